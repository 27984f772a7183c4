//! [Loca](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6loca.html) table implementation.

use std::ops::Range;

use super::{cmap::GlyphID, head::LocaTableFormat};
use crate::{stream::Stream, ttf::TTFParseError};

/// Byte offsets of every glyph relative to the start of the `glyf` table.
#[derive(Clone, Debug)]
pub struct LocaTable {
    /// `num_glyphs + 1` entries, the last one marks the end of the final glyph
    offsets: Vec<u32>,
}

impl LocaTable {
    pub fn new(
        data: &[u8],
        format: LocaTableFormat,
        num_glyphs: usize,
    ) -> Result<Self, TTFParseError> {
        let mut stream = Stream::new(data);

        let offsets = (0..=num_glyphs)
            .map(|_| match format {
                // The offset / 2 is stored in short tables
                LocaTableFormat::Short => stream.read::<u16>().map(|offset| offset as u32 * 2),
                LocaTableFormat::Long => stream.read::<u32>(),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(glyph) = offsets.windows(2).position(|pair| pair[0] > pair[1]) {
            return Err(TTFParseError::NonMonotonicLoca { glyph });
        }

        Ok(Self { offsets })
    }

    #[inline]
    #[must_use]
    pub fn num_glyphs(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    #[must_use]
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// The byte range of a glyph inside the `glyf` table.
    ///
    /// An empty range means the glyph has no outline.
    pub fn get_glyph_range(&self, glyph_id: GlyphID) -> Result<Range<usize>, TTFParseError> {
        let index = glyph_id.numeric() as usize;
        match (self.offsets.get(index), self.offsets.get(index + 1)) {
            (Some(&start), Some(&end)) => Ok(start as usize..end as usize),
            _ => Err(TTFParseError::GlyphIndexOutOfRange(glyph_id)),
        }
    }
}
