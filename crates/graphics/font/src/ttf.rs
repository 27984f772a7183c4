//! [TrueType](https://developer.apple.com/fonts/TrueType-Reference-Manual) font parser
//!
//! ## Reference Material:
//! * <https://learn.microsoft.com/en-us/typography/opentype/spec/otff>
//! * <https://formats.kaitai.io/ttf/index.html>
//! * <https://handmade.network/forums/articles/t/7330-implementing_a_font_reader_and_rasterizer_from_scratch%252C_part_1__ttf_font_reader>

use thiserror::Error;

use crate::{
    outline::{ResolutionContext, ResolvedOutline},
    path::Path,
    stream::{StreamError, Tag},
    ttf_tables::{
        cmap::{self, CharacterMap, GlyphID},
        glyf::{Glyph, GlyphOutlineTable},
        head::HeadTable,
        hhea::HHEATable,
        hmtx::{HMTXTable, LongHorMetric},
        loca::LocaTable,
        maxp::MaxPTable,
        name::NameTable,
        offset::OffsetTable,
    },
};

pub const CMAP_TAG: Tag = Tag::new(b"cmap");
pub const HEAD_TAG: Tag = Tag::new(b"head");
pub const LOCA_TAG: Tag = Tag::new(b"loca");
pub const GLYF_TAG: Tag = Tag::new(b"glyf");
pub const HHEA_TAG: Tag = Tag::new(b"hhea");
pub const HMTX_TAG: Tag = Tag::new(b"hmtx");
pub const MAXP_TAG: Tag = Tag::new(b"maxp");
pub const NAME_TAG: Tag = Tag::new(b"name");

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TTFParseError {
    #[error("Unexpected end of file")]
    TruncatedBuffer,
    #[error("Unsupported sfnt version {0:#010x}")]
    UnsupportedFormat(u32),
    #[error("Missing required table {0}")]
    TableNotFound(Tag),
    #[error("Invalid loca table format {0}")]
    InvalidLocaFormat(i16),
    #[error("Loca offset of glyph {glyph} is larger than the offset of its successor")]
    NonMonotonicLoca { glyph: usize },
    #[error("Contour end points are not strictly increasing")]
    InvalidContourEndPoints,
    #[error("Repeated glyph flags exceed the number of points")]
    FlagOverflow,
    #[error("Font has glyphs but no horizontal metrics")]
    InvalidHorizontalMetrics,
    #[error("Unsupported cmap subtable format {0}")]
    UnsupportedCmapFormat(u16),
    #[error("Glyph {0} does not exist")]
    GlyphIndexOutOfRange(GlyphID),
    #[error("Compound glyph {0} is cyclic or nested too deeply")]
    CompoundCycleOrDepthExceeded(GlyphID),
    #[error("Compound glyph {0} aligns components by matching points")]
    UnsupportedComponentAlignment(GlyphID),
}

impl From<StreamError> for TTFParseError {
    fn from(value: StreamError) -> Self {
        match value {
            StreamError::UnexpectedEOF => Self::TruncatedBuffer,
        }
    }
}

/// A fully parsed TrueType font.
///
/// Every glyph is decoded and resolved when the font is loaded, queries never
/// touch the underlying bytes again.
#[derive(Clone, Debug)]
pub struct Font {
    offset_table: OffsetTable,
    head_table: HeadTable,
    maxp_table: MaxPTable,
    cmap_table: cmap::CMAPTable,
    character_map: CharacterMap,
    loca_table: LocaTable,
    glyphs: Vec<Glyph>,
    outlines: Vec<ResolvedOutline>,
    hhea_table: HHEATable,
    hmtx_table: HMTXTable,
    name_table: Option<NameTable>,
}

impl Font {
    pub fn new(data: &[u8]) -> Result<Self, TTFParseError> {
        let offset_table = OffsetTable::new(data)?;
        verify_checksums(&offset_table, data);

        let head_entry = offset_table.required_table(HEAD_TAG)?;
        let head_table = HeadTable::new(head_entry.data(data)?)?;

        let maxp_entry = offset_table.required_table(MAXP_TAG)?;
        let maxp_table = MaxPTable::new(maxp_entry.data(data)?)?;

        let cmap_entry = offset_table.required_table(CMAP_TAG)?;
        let cmap_data = cmap_entry.data(data)?;
        let cmap_table = cmap::CMAPTable::new(cmap_data)?;
        let character_map = match read_character_map(&cmap_table, cmap_data) {
            Ok(character_map) => character_map,
            Err(TTFParseError::UnsupportedCmapFormat(format)) => {
                log::warn!(
                    "Font has no format 4 cmap subtable (found format {format}), every character will map to .notdef"
                );
                CharacterMap::default()
            },
            Err(error) => return Err(error),
        };

        let loca_entry = offset_table.required_table(LOCA_TAG)?;
        let loca_table = LocaTable::new(
            loca_entry.data(data)?,
            head_table.loca_table_format(),
            maxp_table.num_glyphs(),
        )?;

        let glyf_entry = offset_table.required_table(GLYF_TAG)?;
        let glyph_table = GlyphOutlineTable::new(glyf_entry.data(data)?, &loca_table);
        let glyphs = (0..maxp_table.num_glyphs)
            .map(|glyph_id| glyph_table.get_glyph(GlyphID::new(glyph_id)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut resolution_context =
            ResolutionContext::new(&glyphs, maxp_table.max_component_depth);
        let outlines = (0..maxp_table.num_glyphs)
            .map(GlyphID::new)
            .map(|glyph_id| {
                resolution_context
                    .resolve(glyph_id)
                    .unwrap_or_else(|error| {
                        log::warn!("Failed to resolve outline of glyph {glyph_id}: {error}");
                        ResolvedOutline::default()
                    })
            })
            .collect();

        let hhea_entry = offset_table.required_table(HHEA_TAG)?;
        let hhea_table = HHEATable::new(hhea_entry.data(data)?)?;

        let hmtx_entry = offset_table.required_table(HMTX_TAG)?;
        let hmtx_table = HMTXTable::new(
            hmtx_entry.data(data)?,
            hhea_table.num_of_long_hor_metrics(),
            maxp_table.num_glyphs(),
        )?;

        // Fonts will usually specify their own name, though it is not required
        let name_table = offset_table.get_table(NAME_TAG).and_then(|name_entry| {
            name_entry
                .data(data)
                .and_then(NameTable::new)
                .map_err(|error| log::warn!("Ignoring malformed name table: {error}"))
                .ok()
        });

        let font = Self {
            offset_table,
            head_table,
            maxp_table,
            cmap_table,
            character_map,
            loca_table,
            glyphs,
            outlines,
            hhea_table,
            hmtx_table,
            name_table,
        };

        log::info!(
            "Loaded font {:?} with {} glyphs and {} mapped characters",
            font.name().unwrap_or_else(|| "<unnamed>".to_string()),
            font.num_glyphs(),
            font.character_map.len(),
        );

        Ok(font)
    }

    /// Get the total number of glyphs defined in the font
    #[inline]
    #[must_use]
    pub fn num_glyphs(&self) -> usize {
        self.maxp_table.num_glyphs()
    }

    #[inline]
    #[must_use]
    pub fn units_per_em(&self) -> u16 {
        self.head_table.units_per_em()
    }

    /// Get the full name of the font, if specified.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.name_table.as_ref()?.get_font_name()
    }

    /// Find the glyph for a character, falling back to `.notdef` for unmapped characters
    #[inline]
    #[must_use]
    pub fn glyph_id_for_char(&self, c: char) -> GlyphID {
        self.glyph_id_for_codepoint(c as u32)
    }

    #[inline]
    #[must_use]
    pub fn glyph_id_for_codepoint(&self, codepoint: u32) -> GlyphID {
        self.character_map.get(codepoint)
    }

    pub fn glyph(&self, glyph_id: GlyphID) -> Result<&Glyph, TTFParseError> {
        self.glyphs
            .get(glyph_id.numeric() as usize)
            .ok_or(TTFParseError::GlyphIndexOutOfRange(glyph_id))
    }

    /// Get the resolved outline of a glyph.
    ///
    /// Glyphs whose components could not be resolved have an empty outline.
    pub fn outline_for(&self, glyph_id: GlyphID) -> Result<&ResolvedOutline, TTFParseError> {
        self.outlines
            .get(glyph_id.numeric() as usize)
            .ok_or(TTFParseError::GlyphIndexOutOfRange(glyph_id))
    }

    /// Resolve the outline of a glyph again, reporting why resolution fails if it does.
    pub fn resolve_outline(&self, glyph_id: GlyphID) -> Result<ResolvedOutline, TTFParseError> {
        ResolutionContext::new(&self.glyphs, self.maxp_table.max_component_depth).resolve(glyph_id)
    }

    pub fn paths_for(&self, glyph_id: GlyphID) -> Result<Vec<Path>, TTFParseError> {
        Ok(self.outline_for(glyph_id)?.paths())
    }

    pub fn metric_for(&self, glyph_id: GlyphID) -> Result<LongHorMetric, TTFParseError> {
        self.hmtx_table.get_metric_for(glyph_id)
    }

    /// Compute the total advance width of a string, in font units.
    #[must_use]
    pub fn advance_width_of(&self, text: &str) -> u32 {
        text.chars()
            .map(|c| {
                self.metric_for(self.glyph_id_for_char(c))
                    .map(|metric| metric.advance_width() as u32)
                    .unwrap_or_default()
            })
            .sum()
    }

    #[inline]
    #[must_use]
    pub fn offset_table(&self) -> &OffsetTable {
        &self.offset_table
    }

    #[inline]
    #[must_use]
    pub fn head(&self) -> &HeadTable {
        &self.head_table
    }

    #[inline]
    #[must_use]
    pub fn maxp(&self) -> &MaxPTable {
        &self.maxp_table
    }

    #[inline]
    #[must_use]
    pub fn hhea(&self) -> &HHEATable {
        &self.hhea_table
    }

    #[inline]
    #[must_use]
    pub fn cmap(&self) -> &cmap::CMAPTable {
        &self.cmap_table
    }

    #[inline]
    #[must_use]
    pub fn character_map(&self) -> &CharacterMap {
        &self.character_map
    }

    #[inline]
    #[must_use]
    pub fn loca(&self) -> &LocaTable {
        &self.loca_table
    }
}

fn read_character_map(
    cmap_table: &cmap::CMAPTable,
    cmap_data: &[u8],
) -> Result<CharacterMap, TTFParseError> {
    let record = cmap_table.get_format4_record()?;
    log::debug!("Using cmap subtable {record:?}");

    let subtable = cmap_data
        .get(record.offset as usize..)
        .ok_or(TTFParseError::TruncatedBuffer)?;
    let format4 = cmap::Format4::new(subtable)?;
    CharacterMap::new(&format4)
}

/// Checksums are only advisory, so a mismatch never fails the load.
///
/// Tables that do not fit into the file are skipped here, required ones are rejected
/// once they are actually parsed.
fn verify_checksums(offset_table: &OffsetTable, data: &[u8]) {
    for entry in offset_table.tables() {
        // The head checksum covers the checkSumAdjustment field, which depends on the whole file
        if entry.tag() == HEAD_TAG {
            continue;
        }

        match entry.checksum_matches(data) {
            Ok(true) => {},
            Ok(false) => log::warn!("Checksum mismatch in {} table", entry.tag()),
            Err(_) => log::warn!("{} table lies outside of the font file", entry.tag()),
        }
    }
}
