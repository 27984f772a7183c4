//! The [Table Directory](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6.html#Directory)
//! at the very start of every sfnt file.

use std::fmt;

use crate::{
    stream::{Stream, Tag},
    ttf::TTFParseError,
};

/// `0x00010000`, used by TrueType fonts on all platforms
const SCALER_TYPE_TRUETYPE: u32 = 0x00010000;

/// `true`, used by older Apple fonts
const SCALER_TYPE_APPLE: u32 = u32::from_be_bytes(*b"true");

#[derive(Clone, Debug)]
pub struct OffsetTable {
    scaler_type: u32,
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
    tables: Vec<TableEntry>,
}

impl OffsetTable {
    pub fn new(data: &[u8]) -> Result<Self, TTFParseError> {
        let mut stream = Stream::new(data);

        // 12 byte header + 16 bytes per table
        let scaler_type = stream.read::<u32>()?;
        if scaler_type != SCALER_TYPE_TRUETYPE && scaler_type != SCALER_TYPE_APPLE {
            return Err(TTFParseError::UnsupportedFormat(scaler_type));
        }

        let num_tables = stream.read::<u16>()? as usize;
        let search_range = stream.read::<u16>()?;
        let entry_selector = stream.read::<u16>()?;
        let range_shift = stream.read::<u16>()?;

        let tables = (0..num_tables)
            .map(|_| TableEntry::read(&mut stream))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            scaler_type,
            search_range,
            entry_selector,
            range_shift,
            tables,
        })
    }

    #[inline]
    #[must_use]
    pub fn scaler_type(&self) -> u32 {
        self.scaler_type
    }

    #[inline]
    #[must_use]
    pub fn search_range(&self) -> u16 {
        self.search_range
    }

    #[inline]
    #[must_use]
    pub fn entry_selector(&self) -> u16 {
        self.entry_selector
    }

    #[inline]
    #[must_use]
    pub fn range_shift(&self) -> u16 {
        self.range_shift
    }

    #[inline]
    #[must_use]
    pub fn get_table(&self, target_tag: Tag) -> Option<TableEntry> {
        // Fonts only have a small number of tables (< 20), a linear search is fine
        self.tables()
            .iter()
            .find(|table| table.tag() == target_tag)
            .copied()
    }

    /// Like [Self::get_table], but a missing table is an error.
    pub fn required_table(&self, target_tag: Tag) -> Result<TableEntry, TTFParseError> {
        self.get_table(target_tag)
            .ok_or(TTFParseError::TableNotFound(target_tag))
    }

    #[inline]
    #[must_use]
    pub fn tables(&self) -> &[TableEntry] {
        &self.tables
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    tag: Tag,
    checksum: u32,
    offset: u32,
    length: u32,
}

impl TableEntry {
    fn read(stream: &mut Stream<'_>) -> Result<Self, TTFParseError> {
        Ok(Self {
            tag: stream.read_tag()?,
            checksum: stream.read()?,
            offset: stream.read()?,
            length: stream.read()?,
        })
    }

    #[inline]
    #[must_use]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    #[must_use]
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset as usize
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length as usize
    }

    /// The bytes of this table inside the font file.
    pub fn data<'a>(&self, font_data: &'a [u8]) -> Result<&'a [u8], TTFParseError> {
        let end = self
            .offset()
            .checked_add(self.length())
            .ok_or(TTFParseError::TruncatedBuffer)?;
        font_data
            .get(self.offset()..end)
            .ok_or(TTFParseError::TruncatedBuffer)
    }

    /// Sum of the table as big-endian `u32` words, zero padded at the end.
    pub fn compute_checksum(table: &[u8]) -> u32 {
        table.chunks(4).fold(0_u32, |sum, chunk| {
            let mut word = [0; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            sum.wrapping_add(u32::from_be_bytes(word))
        })
    }

    /// Whether the stored checksum matches the table contents.
    ///
    /// Note that the checksum of the `head` table never matches, since it
    /// includes the `checksumAdjustment` field.
    pub fn checksum_matches(&self, font_data: &[u8]) -> Result<bool, TTFParseError> {
        Ok(Self::compute_checksum(self.data(font_data)?) == self.checksum)
    }
}

impl fmt::Debug for TableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table Entry")
            .field("tag", &self.tag().to_string())
            .field("checksum", &self.checksum())
            .field("offset", &self.offset())
            .field("length", &self.length())
            .finish()
    }
}
