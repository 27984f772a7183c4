//! [Horizontal Header](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6hhea.html) Table
//!
//! Mostly just contains information for the [hmtx](super::hmtx) table.

use crate::{stream::Stream, ttf::TTFParseError};

#[derive(Clone, Copy, Debug)]
pub struct HHEATable {
    pub version: u32,

    /// Distance from baseline of highest ascender
    pub ascent: i16,

    /// Distance from baseline of lowest descender
    pub descent: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    pub metric_data_format: i16,
    num_of_long_hor_metrics: u16,
}

impl HHEATable {
    pub fn new(data: &[u8]) -> Result<Self, TTFParseError> {
        let mut stream = Stream::new(data);

        let version = stream.read()?;
        let ascent = stream.read()?;
        let descent = stream.read()?;
        let line_gap = stream.read()?;
        let advance_width_max = stream.read()?;
        let min_left_side_bearing = stream.read()?;
        let min_right_side_bearing = stream.read()?;
        let x_max_extent = stream.read()?;
        let caret_slope_rise = stream.read()?;
        let caret_slope_run = stream.read()?;
        let caret_offset = stream.read()?;

        // Four reserved i16 values
        stream.skip_bytes(8)?;

        let metric_data_format = stream.read()?;
        let num_of_long_hor_metrics = stream.read()?;

        Ok(Self {
            version,
            ascent,
            descent,
            line_gap,
            advance_width_max,
            min_left_side_bearing,
            min_right_side_bearing,
            x_max_extent,
            caret_slope_rise,
            caret_slope_run,
            caret_offset,
            metric_data_format,
            num_of_long_hor_metrics,
        })
    }

    #[inline]
    #[must_use]
    pub fn num_of_long_hor_metrics(&self) -> usize {
        self.num_of_long_hor_metrics as usize
    }
}

#[cfg(test)]
mod tests {
    use super::HHEATable;

    #[test]
    fn parse_hhea() {
        let mut data = 0x00010000_u32.to_be_bytes().to_vec();
        data.extend(800_i16.to_be_bytes());
        data.extend((-200_i16).to_be_bytes());
        data.extend(90_i16.to_be_bytes());
        data.extend([0; 24]);
        data.extend(7_u16.to_be_bytes());
        assert_eq!(data.len(), 36);

        let hhea = HHEATable::new(&data).unwrap();
        assert_eq!(hhea.ascent, 800);
        assert_eq!(hhea.descent, -200);
        assert_eq!(hhea.line_gap, 90);
        assert_eq!(hhea.num_of_long_hor_metrics(), 7);
    }
}
