//! [Head](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6head.html) table implementation

use crate::{stream::Stream, ttf::TTFParseError};

const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocaTableFormat {
    /// Offsets are stored as `u16`, divided by two
    Short,
    Long,
}

#[derive(Clone, Copy, Debug)]
pub struct HeadTable {
    pub major_version: u16,
    pub minor_version: u16,

    /// `Fixed` 16.16 value, set by the font manufacturer
    pub font_revision: u32,
    pub checksum_adjustment: u32,
    pub magic_number: u32,
    pub flags: u16,

    /// Number of font units per em square, in the range `16..=16384`.
    pub units_per_em: u16,

    /// Seconds since 12:00 midnight, January 1, 1904
    pub created: i64,
    pub modified: i64,

    /// The minimum x value that can be encountered while
    /// rendering a glyph from this font, in `FUnits`.
    pub min_x: i16,

    /// The minimum y value that can be encountered while
    /// rendering a glyph from this font, in `FUnits`.
    pub min_y: i16,

    /// The maximum x value that can be encountered while
    /// rendering a glyph from this font, in `FUnits`.
    pub max_x: i16,

    /// The maximum y value that can be encountered while
    /// rendering a glyph from this font, in `FUnits`.
    pub max_y: i16,

    pub mac_style: u16,

    /// Smallest readable size in pixels
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    pub loca_table_format: LocaTableFormat,
    pub glyph_data_format: i16,
}

impl HeadTable {
    pub fn new(data: &[u8]) -> Result<Self, TTFParseError> {
        let mut stream = Stream::new(data);

        let major_version = stream.read()?;
        let minor_version = stream.read()?;
        let font_revision = stream.read()?;
        let checksum_adjustment = stream.read()?;
        let magic_number = stream.read::<u32>()?;

        if magic_number != MAGIC_NUMBER {
            log::warn!(
                "head table has magic number {magic_number:#010x}, expected {MAGIC_NUMBER:#010x}"
            );
        }

        let flags = stream.read()?;
        let units_per_em = stream.read()?;
        let created = stream.read()?;
        let modified = stream.read()?;
        let min_x = stream.read()?;
        let min_y = stream.read()?;
        let max_x = stream.read()?;
        let max_y = stream.read()?;
        let mac_style = stream.read()?;
        let lowest_rec_ppem = stream.read()?;
        let font_direction_hint = stream.read()?;

        let loca_table_format = match stream.read::<i16>()? {
            0 => LocaTableFormat::Short,
            1 => LocaTableFormat::Long,
            other => return Err(TTFParseError::InvalidLocaFormat(other)),
        };

        let glyph_data_format = stream.read()?;

        Ok(Self {
            major_version,
            minor_version,
            font_revision,
            checksum_adjustment,
            magic_number,
            flags,
            units_per_em,
            created,
            modified,
            min_x,
            min_y,
            max_x,
            max_y,
            mac_style,
            lowest_rec_ppem,
            font_direction_hint,
            loca_table_format,
            glyph_data_format,
        })
    }

    #[inline]
    #[must_use]
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Get the format of the [Loca Table](super::loca::LocaTable).
    #[inline]
    #[must_use]
    pub fn loca_table_format(&self) -> LocaTableFormat {
        self.loca_table_format
    }
}
