//! [Horizontal Metrics](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6hmtx.html) table

use super::cmap::GlyphID;
use crate::{stream::Stream, ttf::TTFParseError};

#[derive(Clone, Debug)]
pub struct HMTXTable {
    long_hor_metrics: Vec<LongHorMetric>,

    /// Left side bearings of the glyphs after the last long metric.
    /// These glyphs share the advance width of the last long metric (monospaced tail).
    left_side_bearings: Vec<i16>,
}

impl HMTXTable {
    pub fn new(
        data: &[u8],
        num_of_long_hor_metrics: usize,
        num_glyphs: usize,
    ) -> Result<Self, TTFParseError> {
        if num_of_long_hor_metrics == 0 && num_glyphs != 0 {
            return Err(TTFParseError::InvalidHorizontalMetrics);
        }

        let num_of_long_hor_metrics = if num_of_long_hor_metrics > num_glyphs {
            log::warn!(
                "hhea declares {num_of_long_hor_metrics} long horizontal metrics but the font only has {num_glyphs} glyphs"
            );
            num_glyphs
        } else {
            num_of_long_hor_metrics
        };

        let mut stream = Stream::new(data);
        let long_hor_metrics = (0..num_of_long_hor_metrics)
            .map(|_| -> Result<LongHorMetric, TTFParseError> {
                Ok(LongHorMetric {
                    advance_width: stream.read()?,
                    left_side_bearing: stream.read()?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let left_side_bearings = (num_of_long_hor_metrics..num_glyphs)
            .map(|_| stream.read::<i16>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            long_hor_metrics,
            left_side_bearings,
        })
    }

    #[inline]
    #[must_use]
    pub fn num_glyphs(&self) -> usize {
        self.long_hor_metrics.len() + self.left_side_bearings.len()
    }

    pub fn get_metric_for(&self, glyph_id: GlyphID) -> Result<LongHorMetric, TTFParseError> {
        let index = glyph_id.numeric() as usize;

        if let Some(metric) = self.long_hor_metrics.get(index) {
            return Ok(*metric);
        }

        let left_side_bearing = self
            .left_side_bearings
            .get(index - self.long_hor_metrics.len())
            .copied()
            .ok_or(TTFParseError::GlyphIndexOutOfRange(glyph_id))?;

        // Only reachable if there is at least one long metric
        let advance_width = self
            .long_hor_metrics
            .last()
            .map(LongHorMetric::advance_width)
            .ok_or(TTFParseError::GlyphIndexOutOfRange(glyph_id))?;

        Ok(LongHorMetric {
            advance_width,
            left_side_bearing,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LongHorMetric {
    advance_width: u16,
    left_side_bearing: i16,
}

impl LongHorMetric {
    #[inline]
    #[must_use]
    pub fn advance_width(&self) -> u16 {
        self.advance_width
    }

    #[inline]
    #[must_use]
    pub fn left_side_bearing(&self) -> i16 {
        self.left_side_bearing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hmtx_bytes(long_metrics: &[(u16, i16)], bearings: &[i16]) -> Vec<u8> {
        let mut data = vec![];
        for (advance_width, left_side_bearing) in long_metrics {
            data.extend(advance_width.to_be_bytes());
            data.extend(left_side_bearing.to_be_bytes());
        }
        for bearing in bearings {
            data.extend(bearing.to_be_bytes());
        }
        data
    }

    #[test]
    fn long_metrics() {
        let data = hmtx_bytes(&[(500, 10), (600, -5)], &[]);
        let hmtx = HMTXTable::new(&data, 2, 2).unwrap();

        let metric = hmtx.get_metric_for(GlyphID::new(1)).unwrap();
        assert_eq!(metric.advance_width(), 600);
        assert_eq!(metric.left_side_bearing(), -5);
    }

    #[test]
    fn monospaced_tail_inherits_last_advance() {
        let data = hmtx_bytes(&[(500, 10), (600, -5)], &[7, 8]);
        let hmtx = HMTXTable::new(&data, 2, 4).unwrap();

        let last_long = hmtx.get_metric_for(GlyphID::new(1)).unwrap();
        for glyph in 2..4 {
            let metric = hmtx.get_metric_for(GlyphID::new(glyph)).unwrap();
            assert_eq!(metric.advance_width(), last_long.advance_width());
        }
        assert_eq!(
            hmtx.get_metric_for(GlyphID::new(3))
                .unwrap()
                .left_side_bearing(),
            8
        );
    }

    #[test]
    fn out_of_range() {
        let data = hmtx_bytes(&[(500, 10)], &[1]);
        let hmtx = HMTXTable::new(&data, 1, 2).unwrap();

        assert_eq!(
            hmtx.get_metric_for(GlyphID::new(2)),
            Err(TTFParseError::GlyphIndexOutOfRange(GlyphID::new(2)))
        );
    }

    #[test]
    fn clamp_long_metrics_to_glyph_count() {
        let data = hmtx_bytes(&[(500, 10), (600, 0), (700, 0)], &[]);
        let hmtx = HMTXTable::new(&data, 3, 2).unwrap();

        assert_eq!(hmtx.num_glyphs(), 2);
    }

    #[test]
    fn reject_missing_long_metrics() {
        assert_eq!(
            HMTXTable::new(&[], 0, 1).unwrap_err(),
            TTFParseError::InvalidHorizontalMetrics
        );
    }

    #[test]
    fn truncated() {
        let data = hmtx_bytes(&[(500, 10)], &[]);
        assert_eq!(
            HMTXTable::new(&data, 1, 2).unwrap_err(),
            TTFParseError::TruncatedBuffer
        );
    }
}
