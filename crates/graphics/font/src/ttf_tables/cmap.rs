//! [CMAP](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6cmap.html) table implementation

use std::{collections::HashMap, fmt};

use crate::{stream::Stream, ttf::TTFParseError};

/// Zero-cost wrapper around a `u16` for extra type safety.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphID(u16);

impl GlyphID {
    /// The id of the replacement glyph (`.notdef`)
    pub const REPLACEMENT: Self = Self(0);

    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn numeric(self) -> u16 {
        self.0
    }
}

impl From<GlyphID> for u16 {
    fn from(value: GlyphID) -> Self {
        value.0
    }
}

impl fmt::Display for GlyphID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformID {
    Unicode(UnicodePlatformSpecificID),
    Mac,
    Reserved,
    Microsoft(WindowsPlatformSpecificID),
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnicodePlatformSpecificID {
    Version1_0,
    Version1_1,
    Iso10646_1993SemanticDeprecated,
    Unicode2_0OrLaterBmpOnly,
    Unicode2_0OrLater,
    UnicodeVariationSequences,
    LastResort,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowsPlatformSpecificID {
    Symbol,
    UnicodeBmpOnly,
    ShiftJis,
    Prc,
    BigFive,
    Johab,
    UnicodeUcs4,
    Unknown,
}

impl From<(u16, u16)> for PlatformID {
    fn from(value: (u16, u16)) -> Self {
        match value.0 {
            0 => Self::Unicode(value.1.into()),
            1 => Self::Mac,
            2 => Self::Reserved,
            3 => Self::Microsoft(value.1.into()),
            _ => Self::Unknown,
        }
    }
}

impl From<u16> for UnicodePlatformSpecificID {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::Version1_0,
            1 => Self::Version1_1,
            2 => Self::Iso10646_1993SemanticDeprecated,
            3 => Self::Unicode2_0OrLaterBmpOnly,
            4 => Self::Unicode2_0OrLater,
            5 => Self::UnicodeVariationSequences,
            6 => Self::LastResort,
            _ => Self::Unknown,
        }
    }
}

impl From<u16> for WindowsPlatformSpecificID {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::Symbol,
            1 => Self::UnicodeBmpOnly,
            2 => Self::ShiftJis,
            3 => Self::Prc,
            4 => Self::BigFive,
            5 => Self::Johab,
            10 => Self::UnicodeUcs4,
            _ => Self::Unknown,
        }
    }
}

impl PlatformID {
    #[must_use]
    pub fn is_unicode(&self) -> bool {
        matches!(
            self,
            Self::Unicode(_)
                | Self::Microsoft(WindowsPlatformSpecificID::UnicodeBmpOnly)
                | Self::Microsoft(WindowsPlatformSpecificID::UnicodeUcs4)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingRecord {
    pub platform_id: PlatformID,

    /// Offset of the subtable from the start of the cmap table
    pub offset: u32,

    /// Format of the subtable the record points to
    pub format: u16,
}

#[derive(Clone, Debug)]
pub struct CMAPTable {
    version: u16,
    encoding_records: Vec<EncodingRecord>,
}

impl CMAPTable {
    pub fn new(data: &[u8]) -> Result<Self, TTFParseError> {
        let mut stream = Stream::new(data);
        let version = stream.read()?;
        let num_subtables = stream.read::<u16>()?;

        let encoding_records = (0..num_subtables)
            .map(|_| -> Result<EncodingRecord, TTFParseError> {
                let platform_id = stream.read::<u16>()?;
                let platform_specific_id = stream.read::<u16>()?;
                let offset = stream.read::<u32>()?;
                let format = Stream::new_at(data, offset as usize)?.read::<u16>()?;

                Ok(EncodingRecord {
                    platform_id: (platform_id, platform_specific_id).into(),
                    offset,
                    format,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version,
            encoding_records,
        })
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u16 {
        self.version
    }

    #[inline]
    #[must_use]
    pub fn encoding_records(&self) -> &[EncodingRecord] {
        &self.encoding_records
    }

    /// Pick the subtable that is used for character lookups.
    ///
    /// This is the last unicode subtable in format 4, or the last format 4 subtable
    /// of any platform if there is no unicode one.
    pub fn get_format4_record(&self) -> Result<EncodingRecord, TTFParseError> {
        let format4_records = || {
            self.encoding_records
                .iter()
                .rev()
                .filter(|record| record.format == 4)
        };

        format4_records()
            .find(|record| record.platform_id.is_unicode())
            .or_else(|| format4_records().next())
            .copied()
            .ok_or_else(|| {
                let format = self
                    .encoding_records
                    .last()
                    .map_or(0, |record| record.format);
                TTFParseError::UnsupportedCmapFormat(format)
            })
    }
}

/// [Segment mapping to delta values](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values)
#[derive(Clone, Debug)]
pub struct Format4 {
    segments: Vec<Format4Segment>,

    /// The id range offset array followed by the glyph id array.
    ///
    /// Glyph lookups index into this relative to the id range offset of their segment.
    glyph_id_data: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Format4Segment {
    pub start_code: u16,
    pub end_code: u16,
    pub id_delta: i16,
    pub id_range_offset: u16,
}

impl Format4Segment {
    fn is_sentinel(&self) -> bool {
        self.start_code == 0xFFFF && self.end_code == 0xFFFF
    }

    /// The end code itself is not part of the segment.
    fn contains(&self, codepoint: u16) -> bool {
        (self.start_code..self.end_code).contains(&codepoint)
    }
}

impl Format4 {
    pub fn new(data: &[u8]) -> Result<Self, TTFParseError> {
        // Byte layout looks like this:
        // Header        : 14 bytes
        // End Code      : [u16; segcount]
        //                 < 2 byte padding>
        // Start Code    : [u16; segcount]
        // ID Delta      : [i16; segcount]
        // ID Range Offs : [u16; segcount]
        // Glyph IDS     : remaining space
        let mut stream = Stream::new(data);

        let format = stream.read::<u16>()?;
        if format != 4 {
            return Err(TTFParseError::UnsupportedCmapFormat(format));
        }

        let length = stream.read::<u16>()? as usize;
        let data = data.get(..length).ok_or(TTFParseError::TruncatedBuffer)?;

        let _language = stream.read::<u16>()?;
        let segment_count = stream.read::<u16>()? as usize / 2;

        // search range, entry selector and range shift are only useful for binary searching
        stream.skip_bytes(6)?;

        let read_array = |stream: &mut Stream<'_>| {
            (0..segment_count)
                .map(|_| stream.read::<u16>())
                .collect::<Result<Vec<_>, _>>()
        };

        let end_codes = read_array(&mut stream)?;
        let _reserved_pad = stream.read::<u16>()?;
        let start_codes = read_array(&mut stream)?;
        let id_deltas = read_array(&mut stream)?;

        let id_range_offsets_start = stream.position();
        let id_range_offsets = read_array(&mut stream)?;

        let segments = (0..segment_count)
            .map(|i| Format4Segment {
                start_code: start_codes[i],
                end_code: end_codes[i],
                id_delta: id_deltas[i] as i16,
                id_range_offset: id_range_offsets[i],
            })
            .collect();

        let glyph_id_data = data
            .get(id_range_offsets_start..)
            .ok_or(TTFParseError::TruncatedBuffer)?
            .to_vec();

        Ok(Self {
            segments,
            glyph_id_data,
        })
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Format4Segment] {
        &self.segments
    }

    /// Look up the glyph for a codepoint by searching the segments.
    ///
    /// Returns `None` if no segment contains the codepoint.
    pub fn get_glyph_id(&self, codepoint: u16) -> Result<Option<GlyphID>, TTFParseError> {
        let Some((segment_index, segment)) = self
            .segments()
            .iter()
            .enumerate()
            .find(|(_, segment)| !segment.is_sentinel() && segment.contains(codepoint))
        else {
            return Ok(None);
        };

        self.glyph_id_in_segment(segment_index, segment, codepoint)
            .map(Some)
    }

    fn glyph_id_in_segment(
        &self,
        segment_index: usize,
        segment: &Format4Segment,
        codepoint: u16,
    ) -> Result<GlyphID, TTFParseError> {
        if segment.id_range_offset == 0 {
            let numeric_id = codepoint.wrapping_add_signed(segment.id_delta);
            return Ok(GlyphID(numeric_id));
        }

        // The id range offset is relative to its own position inside the id range offset array.
        // Since glyph_id_data starts at that array, the segment index gets us to that position.
        let position = segment_index * 2
            + segment.id_range_offset as usize
            + (codepoint - segment.start_code) as usize * 2;

        let glyph_id = Stream::new_at(&self.glyph_id_data, position)?.read::<u16>()?;

        // Zero means that the codepoint is not mapped, even if the delta is nonzero
        if glyph_id == 0 {
            return Ok(GlyphID::REPLACEMENT);
        }

        Ok(GlyphID(glyph_id.wrapping_add_signed(segment.id_delta)))
    }

    /// Call `f` for every codepoint defined in the font, together with its glyph
    pub fn for_each_mapping<F>(&self, mut f: F) -> Result<(), TTFParseError>
    where
        F: FnMut(u16, GlyphID),
    {
        for (segment_index, segment) in self.segments().iter().enumerate() {
            if segment.is_sentinel() {
                continue;
            }

            for codepoint in segment.start_code..segment.end_code {
                f(
                    codepoint,
                    self.glyph_id_in_segment(segment_index, segment, codepoint)?,
                );
            }
        }
        Ok(())
    }
}

/// Eagerly computed mapping from codepoints to glyphs.
#[derive(Clone, Debug, Default)]
pub struct CharacterMap {
    glyph_ids: HashMap<u16, GlyphID>,
}

impl CharacterMap {
    pub fn new(format4: &Format4) -> Result<Self, TTFParseError> {
        let mut glyph_ids = HashMap::new();
        format4.for_each_mapping(|codepoint, glyph_id| {
            // Segments are sorted, if they overlap anyways the first one wins
            glyph_ids.entry(codepoint).or_insert(glyph_id);
        })?;

        Ok(Self { glyph_ids })
    }

    /// Find the glyph for a given codepoint.
    ///
    /// Codepoints that are not covered by the font map to the replacement glyph.
    #[must_use]
    pub fn get(&self, codepoint: u32) -> GlyphID {
        u16::try_from(codepoint)
            .ok()
            .and_then(|codepoint| self.glyph_ids.get(&codepoint).copied())
            .unwrap_or(GlyphID::REPLACEMENT)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyph_ids.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyph_ids.is_empty()
    }

    /// All codepoints that map to a glyph, in ascending order.
    pub fn codepoints(&self) -> Vec<u16> {
        let mut codepoints: Vec<u16> = self.glyph_ids.keys().copied().collect();
        codepoints.sort_unstable();
        codepoints
    }
}
