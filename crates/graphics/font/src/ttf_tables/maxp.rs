//! [MaxP](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6maxp.html) table implementation.

use crate::{stream::Stream, ttf::TTFParseError};

/// Version 0.5, used by fonts with CFF outlines. Only contains `num_glyphs`.
const VERSION_0_5: u32 = 0x00005000;

#[derive(Clone, Copy, Debug, Default)]
pub struct MaxPTable {
    pub version: u32,

    /// Number of glyphs defined in the font
    pub num_glyphs: u16,

    /// Maximum points in a simple glyph
    pub max_points: u16,

    /// Maximum contours in a simple glyph
    pub max_contours: u16,
    pub max_composite_points: u16,
    pub max_composite_contours: u16,
    pub max_zones: u16,
    pub max_twilight_points: u16,

    /// Maximum number of storage units used by the interpreter
    pub max_storage: u16,

    /// Maximum number of function definitions
    pub max_function_defs: u16,
    pub max_instruction_defs: u16,
    pub max_stack_elements: u16,
    pub max_size_of_instructions: u16,
    pub max_component_elements: u16,

    /// Maximum levels of recursion in compound glyphs, `1` for
    /// compound glyphs that only reference simple glyphs.
    pub max_component_depth: u16,
}

impl MaxPTable {
    pub fn new(data: &[u8]) -> Result<Self, TTFParseError> {
        let mut stream = Stream::new(data);

        let version = stream.read::<u32>()?;
        let num_glyphs = stream.read()?;

        if version == VERSION_0_5 {
            return Ok(Self {
                version,
                num_glyphs,
                ..Default::default()
            });
        }

        Ok(Self {
            version,
            num_glyphs,
            max_points: stream.read()?,
            max_contours: stream.read()?,
            max_composite_points: stream.read()?,
            max_composite_contours: stream.read()?,
            max_zones: stream.read()?,
            max_twilight_points: stream.read()?,
            max_storage: stream.read()?,
            max_function_defs: stream.read()?,
            max_instruction_defs: stream.read()?,
            max_stack_elements: stream.read()?,
            max_size_of_instructions: stream.read()?,
            max_component_elements: stream.read()?,
            max_component_depth: stream.read()?,
        })
    }

    #[inline]
    #[must_use]
    pub fn num_glyphs(&self) -> usize {
        self.num_glyphs as usize
    }
}

#[cfg(test)]
mod tests {
    use super::MaxPTable;

    #[test]
    fn version_1_0() {
        let mut data = 0x00010000_u32.to_be_bytes().to_vec();
        for value in 1..=14_u16 {
            data.extend(value.to_be_bytes());
        }

        let maxp = MaxPTable::new(&data).unwrap();
        assert_eq!(maxp.num_glyphs(), 1);
        assert_eq!(maxp.max_points, 2);
        assert_eq!(maxp.max_storage, 8);
        assert_eq!(maxp.max_component_depth, 14);
    }

    #[test]
    fn version_0_5() {
        let mut data = 0x00005000_u32.to_be_bytes().to_vec();
        data.extend(300_u16.to_be_bytes());

        let maxp = MaxPTable::new(&data).unwrap();
        assert_eq!(maxp.num_glyphs(), 300);
        assert_eq!(maxp.max_component_depth, 0);
    }
}
