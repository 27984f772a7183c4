//! [Glyph](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6glyf.html) table implementation

use std::fmt;

use super::{cmap::GlyphID, loca::LocaTable};
use crate::{stream::Stream, ttf::TTFParseError};

pub struct GlyphOutlineTable<'a> {
    data: &'a [u8],
    loca_table: &'a LocaTable,
}

impl<'a> GlyphOutlineTable<'a> {
    pub fn new(data: &'a [u8], loca_table: &'a LocaTable) -> Self {
        Self { data, loca_table }
    }

    /// Decode a single glyph.
    ///
    /// Compound glyphs are returned as-is, their components are not resolved.
    pub fn get_glyph(&self, glyph_id: GlyphID) -> Result<Glyph, TTFParseError> {
        let range = self.loca_table.get_glyph_range(glyph_id)?;

        // Glyphs without an outline (like spaces) take up no space at all
        if range.is_empty() {
            return Ok(Glyph::Simple(SimpleGlyph::default()));
        }

        let data = self
            .data
            .get(range)
            .ok_or(TTFParseError::TruncatedBuffer)?;
        Glyph::from_data(data)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    pub min_x: i16,
    pub min_y: i16,
    pub max_x: i16,
    pub max_y: i16,
}

impl Metrics {
    pub fn width(&self) -> i32 {
        self.max_x as i32 - self.min_x as i32
    }

    pub fn height(&self) -> i32 {
        self.max_y as i32 - self.min_y as i32
    }
}

/// A point on a glyph outline, in font units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphPoint {
    pub x: i32,
    pub y: i32,

    /// Off-curve points are control points of quadratic bezier curves
    pub is_on_curve: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Glyph {
    Simple(SimpleGlyph),
    Compound(CompoundGlyph),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleGlyph {
    pub metrics: Metrics,

    /// Index of the last point of each contour, strictly increasing
    pub end_points_of_contours: Vec<u16>,

    /// Hinting instructions are not executed, we only keep track of their size
    pub instruction_length: u16,
    pub points: Vec<GlyphPoint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompoundGlyph {
    pub metrics: Metrics,
    pub components: Vec<GlyphComponent>,
}

impl Glyph {
    pub fn from_data(data: &[u8]) -> Result<Self, TTFParseError> {
        // Memory map is like this (same for simple & compound glyphs):
        // num contours          : i16
        // min x                 : i16
        // min y                 : i16
        // max x                 : i16
        // max y                 : i16
        let mut stream = Stream::new(data);
        let num_contours = stream.read::<i16>()?;
        let metrics = Metrics {
            min_x: stream.read()?,
            min_y: stream.read()?,
            max_x: stream.read()?,
            max_y: stream.read()?,
        };

        // A glyph is simple if num_contours is positive or zero
        if num_contours.is_negative() {
            let components = read_components(&mut stream)?;
            Ok(Self::Compound(CompoundGlyph {
                metrics,
                components,
            }))
        } else {
            let glyph = SimpleGlyph::read(&mut stream, num_contours as usize, metrics)?;
            Ok(Self::Simple(glyph))
        }
    }

    pub fn metrics(&self) -> Metrics {
        match self {
            Self::Simple(simple_glyph) => simple_glyph.metrics,
            Self::Compound(compound_glyph) => compound_glyph.metrics,
        }
    }
}

impl SimpleGlyph {
    fn read(
        stream: &mut Stream<'_>,
        num_contours: usize,
        metrics: Metrics,
    ) -> Result<Self, TTFParseError> {
        // Simple glyphs are structured as follows:
        //
        // end points of contours: [u16; num contours]
        // instruction length    : u16
        // instructions          : [u8; instruction length]
        // flags                 : [u8; unknown]
        // x coords              : [u8 or i16; last value in "end points of contours" + 1]
        // y coords              : [u8 or i16; last value in "end points of contours" + 1]
        let end_points_of_contours = (0..num_contours)
            .map(|_| stream.read::<u16>())
            .collect::<Result<Vec<_>, _>>()?;

        if end_points_of_contours
            .windows(2)
            .any(|pair| pair[0] >= pair[1])
        {
            return Err(TTFParseError::InvalidContourEndPoints);
        }

        let num_points = end_points_of_contours
            .last()
            .map_or(0, |&last| last as usize + 1);

        let instruction_length = stream.read::<u16>()?;
        stream.skip_bytes(instruction_length as usize)?;

        let flags = read_flags(stream, num_points)?;

        // The x and y coordinates are stored in two separate runs, all x values come first
        let xs = flags
            .iter()
            .scan(0_i32, |accumulator, flag| {
                Some(read_delta(stream, flag.coordinate_type_x()).map(|delta| {
                    *accumulator += delta;
                    *accumulator
                }))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ys = flags
            .iter()
            .scan(0_i32, |accumulator, flag| {
                Some(read_delta(stream, flag.coordinate_type_y()).map(|delta| {
                    *accumulator += delta;
                    *accumulator
                }))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let points = flags
            .iter()
            .zip(xs.into_iter().zip(ys))
            .map(|(flag, (x, y))| GlyphPoint {
                x,
                y,
                is_on_curve: flag.is_on_curve(),
            })
            .collect();

        Ok(Self {
            metrics,
            end_points_of_contours,
            instruction_length,
            points,
        })
    }

    #[inline]
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The points of each contour, in order.
    pub fn contours(&self) -> impl Iterator<Item = &[GlyphPoint]> + '_ {
        contours(&self.points, &self.end_points_of_contours)
    }
}

/// Split a list of points into contours.
pub(crate) fn contours<'a, E: Copy + Into<usize>>(
    points: &'a [GlyphPoint],
    end_points_of_contours: &'a [E],
) -> impl Iterator<Item = &'a [GlyphPoint]> + 'a {
    end_points_of_contours
        .iter()
        .scan(0, move |start, &end| {
            let end: usize = end.into();
            let contour = points.get(*start..=end)?;
            *start = end + 1;
            Some(contour)
        })
}

/// Read the run-length encoded flag array of a simple glyph.
///
/// The size of the flag array is unknown up front, a flag can repeat itself n times.
/// We read until there is one flag for each point.
fn read_flags(stream: &mut Stream<'_>, num_points: usize) -> Result<Vec<GlyphFlag>, TTFParseError> {
    let mut flags = Vec::with_capacity(num_points);

    while flags.len() < num_points {
        let flag = GlyphFlag(stream.read()?);
        flags.push(flag);

        if flag.repeat() {
            // read another byte, this is the number of times the flag should be
            // repeated
            let repeat_for = stream.read::<u8>()? as usize;
            if flags.len() + repeat_for > num_points {
                return Err(TTFParseError::FlagOverflow);
            }
            flags.extend(std::iter::repeat(flag).take(repeat_for));
        }
    }

    Ok(flags)
}

fn read_delta(
    stream: &mut Stream<'_>,
    coordinate_type: GlyphCoordinateType,
) -> Result<i32, TTFParseError> {
    let delta = match coordinate_type {
        GlyphCoordinateType::Delta16B => stream.read::<i16>()? as i32,
        GlyphCoordinateType::ZeroDelta16B => 0,
        GlyphCoordinateType::Negative8B => -(stream.read::<u8>()? as i32),
        GlyphCoordinateType::Positive8B => stream.read::<u8>()? as i32,
    };
    Ok(delta)
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GlyphFlag(u8);

impl GlyphFlag {
    const POINT_ON_CURVE: u8 = 1;
    const X_SHORT_VECTOR: u8 = 2;
    const Y_SHORT_VECTOR: u8 = 4;
    const REPEAT: u8 = 8;
    const X_IS_SAME_OR_POSITIVE: u8 = 16;
    const Y_IS_SAME_OR_POSITIVE: u8 = 32;

    pub fn is_on_curve(&self) -> bool {
        self.0 & Self::POINT_ON_CURVE != 0
    }

    pub fn repeat(&self) -> bool {
        self.0 & Self::REPEAT != 0
    }

    pub fn coordinate_type_x(&self) -> GlyphCoordinateType {
        GlyphCoordinateType::new(
            self.0 & Self::X_SHORT_VECTOR != 0,
            self.0 & Self::X_IS_SAME_OR_POSITIVE != 0,
        )
    }

    pub fn coordinate_type_y(&self) -> GlyphCoordinateType {
        GlyphCoordinateType::new(
            self.0 & Self::Y_SHORT_VECTOR != 0,
            self.0 & Self::Y_IS_SAME_OR_POSITIVE != 0,
        )
    }
}

impl fmt::Debug for GlyphFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glyph Flag")
            .field("on curve", &self.is_on_curve())
            .field("repeat", &self.repeat())
            .field("x", &self.coordinate_type_x())
            .field("y", &self.coordinate_type_y())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphCoordinateType {
    /// The current coordinate is a 16 bit signed delta change.
    Delta16B,
    /// The current coordinate is 16 bit, has the same value as the previous one.
    ZeroDelta16B,
    /// The current coordinate is 8 bit, value is negative.
    Negative8B,
    /// The current coordinate is 8 bit, value is positive.
    Positive8B,
}

impl GlyphCoordinateType {
    fn new(is_short: bool, is_same_or_positive: bool) -> Self {
        match (is_short, is_same_or_positive) {
            (false, false) => Self::Delta16B,
            (false, true) => Self::ZeroDelta16B,
            (true, false) => Self::Negative8B,
            (true, true) => Self::Positive8B,
        }
    }
}

/// One reference from a compound glyph to another glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphComponent {
    pub flags: CompoundGlyphFlag,
    pub glyph_index: GlyphID,
    pub alignment: ComponentAlignment,
    pub transform: ComponentTransform,
}

/// How a component is positioned relative to the compound glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentAlignment {
    /// The component is moved by the offsets in its [ComponentTransform]
    Offset,

    /// The component is moved so that one of its points lands on a point
    /// of the previously placed components. Not supported.
    MatchPoints {
        compound_point: u16,
        component_point: u16,
    },
}

/// Scale and offset applied to every point of a component.
///
/// Shear and rotation terms of a 2x2 transformation matrix are not
/// applied, only the scale along both axes is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComponentTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl ComponentTransform {
    pub const IDENTITY: Self = Self {
        scale_x: 1.,
        scale_y: 1.,
        offset_x: 0,
        offset_y: 0,
    };

    #[must_use]
    pub fn apply(&self, point: GlyphPoint) -> GlyphPoint {
        GlyphPoint {
            x: scale(point.x, self.scale_x).saturating_add(self.offset_x),
            y: scale(point.y, self.scale_y).saturating_add(self.offset_y),
            is_on_curve: point.is_on_curve,
        }
    }
}

impl Default for ComponentTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn scale(value: i32, factor: f32) -> i32 {
    if factor == 1. {
        value
    } else {
        (value as f32 * factor).round() as i32
    }
}

/// Read a signed 2.14 fixed point number
fn read_f2dot14(stream: &mut Stream<'_>) -> Result<f32, TTFParseError> {
    Ok(stream.read::<i16>()? as f32 / 16384.)
}

fn read_components(stream: &mut Stream<'_>) -> Result<Vec<GlyphComponent>, TTFParseError> {
    // Memory map for compound glyphs looks like this:
    //
    // component flag: u16                       \
    // glyph index: u16                           |
    // X offset, type depends on component flags  | Repeated any number
    // Y offset, type depends on component flags  | of times
    // Transformation options                    /
    let mut components = vec![];

    loop {
        let component = GlyphComponent::read(stream)?;
        components.push(component);

        if component.flags.is_last_component() {
            break;
        }
    }

    // Any instructions that follow the last component are not relevant to us
    Ok(components)
}

impl GlyphComponent {
    fn read(stream: &mut Stream<'_>) -> Result<Self, TTFParseError> {
        let flags = CompoundGlyphFlag(stream.read()?);
        let glyph_index = GlyphID::new(stream.read()?);

        let mut transform = ComponentTransform::IDENTITY;

        let alignment = match (flags.arg_1_and_2_are_words(), flags.args_are_xy_values()) {
            (true, true) => {
                transform.offset_x = stream.read::<i16>()? as i32;
                transform.offset_y = stream.read::<i16>()? as i32;
                ComponentAlignment::Offset
            },
            (false, true) => {
                transform.offset_x = stream.read::<i8>()? as i32;
                transform.offset_y = stream.read::<i8>()? as i32;
                ComponentAlignment::Offset
            },
            (true, false) => ComponentAlignment::MatchPoints {
                compound_point: stream.read()?,
                component_point: stream.read()?,
            },
            (false, false) => ComponentAlignment::MatchPoints {
                compound_point: stream.read::<u8>()? as u16,
                component_point: stream.read::<u8>()? as u16,
            },
        };

        if flags.has_scale() {
            let scale = read_f2dot14(stream)?;
            transform.scale_x = scale;
            transform.scale_y = scale;
        } else if flags.has_xy_scale() {
            transform.scale_x = read_f2dot14(stream)?;
            transform.scale_y = read_f2dot14(stream)?;
        } else if flags.has_two_by_two() {
            transform.scale_x = read_f2dot14(stream)?;
            let scale_01 = read_f2dot14(stream)?;
            let scale_10 = read_f2dot14(stream)?;
            transform.scale_y = read_f2dot14(stream)?;

            if scale_01 != 0. || scale_10 != 0. {
                log::debug!(
                    "Ignoring shear terms ({scale_01}, {scale_10}) of component referencing glyph {}",
                    glyph_index.numeric()
                );
            }
        }

        Ok(Self {
            flags,
            glyph_index,
            alignment,
            transform,
        })
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct CompoundGlyphFlag(u16);

impl CompoundGlyphFlag {
    const ARG_1_AND_2_ARE_WORDS: u16 = 1 << 0;
    const ARGS_ARE_XY_VALUES: u16 = 1 << 1;
    const ROUND_XY_TO_GRID: u16 = 1 << 2;
    const WE_HAVE_A_SCALE: u16 = 1 << 3;
    const MORE_COMPONENTS: u16 = 1 << 5;
    const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 1 << 6;
    const WE_HAVE_A_TWO_BY_TWO: u16 = 1 << 7;
    const WE_HAVE_INSTRUCTIONS: u16 = 1 << 8;
    const USE_MY_METRICS: u16 = 1 << 9;
    const OVERLAP_COMPOUND: u16 = 1 << 10;

    pub fn arg_1_and_2_are_words(&self) -> bool {
        self.0 & Self::ARG_1_AND_2_ARE_WORDS != 0
    }

    pub fn args_are_xy_values(&self) -> bool {
        self.0 & Self::ARGS_ARE_XY_VALUES != 0
    }

    pub fn round_xy_to_grid(&self) -> bool {
        self.0 & Self::ROUND_XY_TO_GRID != 0
    }

    pub fn has_scale(&self) -> bool {
        self.0 & Self::WE_HAVE_A_SCALE != 0
    }

    pub fn is_last_component(&self) -> bool {
        self.0 & Self::MORE_COMPONENTS == 0
    }

    pub fn has_xy_scale(&self) -> bool {
        self.0 & Self::WE_HAVE_AN_X_AND_Y_SCALE != 0
    }

    pub fn has_two_by_two(&self) -> bool {
        self.0 & Self::WE_HAVE_A_TWO_BY_TWO != 0
    }

    pub fn has_instructions(&self) -> bool {
        self.0 & Self::WE_HAVE_INSTRUCTIONS != 0
    }

    pub fn use_my_metrics(&self) -> bool {
        self.0 & Self::USE_MY_METRICS != 0
    }

    pub fn overlap_compound(&self) -> bool {
        self.0 & Self::OVERLAP_COMPOUND != 0
    }
}

impl fmt::Debug for CompoundGlyphFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compound Glyph Flag")
            .field("arg 1 and 2 are words", &self.arg_1_and_2_are_words())
            .field("args are xy values", &self.args_are_xy_values())
            .field("round xy to grid", &self.round_xy_to_grid())
            .field("has scale", &self.has_scale())
            .field("is last component", &self.is_last_component())
            .field("has xy scale", &self.has_xy_scale())
            .field("has two by two", &self.has_two_by_two())
            .field("has instructions", &self.has_instructions())
            .field("use my metrics", &self.use_my_metrics())
            .field("overlap compound", &self.overlap_compound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: i32, y: i32, is_on_curve: bool) -> GlyphPoint {
        GlyphPoint { x, y, is_on_curve }
    }

    #[test]
    fn triangle() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x01, // one contour
            0x00, 0x00, 0x00, 0x00, 0x00, 0x64, 0x00, 0x64, // bounding box
            0x00, 0x02, // end points of contours
            0x00, 0x00, // no instructions
            0x01, 0x01, 0x01, // flags
            0x00, 0x00, 0x00, 0x64, 0xFF, 0xCE, // x deltas
            0x00, 0x00, 0x00, 0x00, 0x00, 0x64, // y deltas
        ];

        let Glyph::Simple(glyph) = Glyph::from_data(&data).unwrap() else {
            panic!("expected a simple glyph");
        };

        assert_eq!(glyph.metrics.width(), 100);
        assert_eq!(glyph.end_points_of_contours, vec![2]);
        assert_eq!(
            glyph.points,
            vec![
                point(0, 0, true),
                point(100, 0, true),
                point(50, 100, true)
            ]
        );
        assert_eq!(glyph.contours().count(), 1);
    }

    #[test]
    fn repeated_flags_and_short_coordinates() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x01,
            0, 0, 0, 0, 0, 0, 0, 0,
            0x00, 0x03,
            0x00, 0x02, 0xAA, 0xBB, // instructions are skipped
            0x3B, 0x02, // on curve, short positive x, same y, repeated twice
            0x02, // off curve, short negative x, 16 bit y
            0x0A, 0x14, 0x1E, 0x05, // x
            0xFF, 0xF9, // y
        ];

        let Glyph::Simple(glyph) = Glyph::from_data(&data).unwrap() else {
            panic!("expected a simple glyph");
        };

        assert_eq!(glyph.instruction_length, 2);
        assert_eq!(glyph.num_points(), 4);
        assert_eq!(
            glyph.points,
            vec![
                point(10, 0, true),
                point(30, 0, true),
                point(60, 0, true),
                point(55, -7, false)
            ]
        );
    }

    #[test]
    fn multiple_contours() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x02,
            0, 0, 0, 0, 0, 0, 0, 0,
            0x00, 0x00, 0x00, 0x02,
            0x00, 0x00,
            0x39, 0x02, // three points, all at the origin
        ];

        let Glyph::Simple(glyph) = Glyph::from_data(&data).unwrap() else {
            panic!("expected a simple glyph");
        };

        let contour_lengths: Vec<usize> = glyph.contours().map(<[GlyphPoint]>::len).collect();
        assert_eq!(contour_lengths, vec![1, 2]);
    }

    #[test]
    fn reject_unordered_end_points() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x02,
            0, 0, 0, 0, 0, 0, 0, 0,
            0x00, 0x02, 0x00, 0x02,
            0x00, 0x00,
        ];

        assert_eq!(
            Glyph::from_data(&data).unwrap_err(),
            TTFParseError::InvalidContourEndPoints
        );
    }

    #[test]
    fn reject_overlong_flag_run() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x01,
            0, 0, 0, 0, 0, 0, 0, 0,
            0x00, 0x01,
            0x00, 0x00,
            0x39, 0x05,
        ];

        assert_eq!(
            Glyph::from_data(&data).unwrap_err(),
            TTFParseError::FlagOverflow
        );
    }

    #[test]
    fn truncated_coordinates() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x01,
            0, 0, 0, 0, 0, 0, 0, 0,
            0x00, 0x00,
            0x00, 0x00,
            0x01,
            0x00,
        ];

        assert_eq!(
            Glyph::from_data(&data).unwrap_err(),
            TTFParseError::TruncatedBuffer
        );
    }

    #[test]
    fn compound_components() {
        #[rustfmt::skip]
        let data = [
            0xFF, 0xFF,
            0, 0, 0, 0, 0, 0, 0, 0,
            // words, xy values, scale, more components
            0x00, 0x2B, 0x00, 0x01,
            0xFF, 0x9C, 0x00, 0xC8,
            0x20, 0x00,
            // bytes, xy values, x and y scale
            0x00, 0x42, 0x00, 0x02,
            0xFF, 0x05,
            0x40, 0x00, 0xC0, 0x00,
        ];

        let Glyph::Compound(glyph) = Glyph::from_data(&data).unwrap() else {
            panic!("expected a compound glyph");
        };

        assert_eq!(glyph.components.len(), 2);

        let first = glyph.components[0];
        assert_eq!(first.glyph_index, GlyphID::new(1));
        assert_eq!(first.alignment, ComponentAlignment::Offset);
        assert_eq!(
            first.transform,
            ComponentTransform {
                scale_x: 0.5,
                scale_y: 0.5,
                offset_x: -100,
                offset_y: 200,
            }
        );

        let second = glyph.components[1];
        assert_eq!(second.glyph_index, GlyphID::new(2));
        assert!(second.flags.is_last_component());
        assert_eq!(
            second.transform,
            ComponentTransform {
                scale_x: 1.,
                scale_y: -1.,
                offset_x: -1,
                offset_y: 5,
            }
        );
    }

    #[test]
    fn two_by_two_only_keeps_scale() {
        #[rustfmt::skip]
        let data = [
            0xFF, 0xFF,
            0, 0, 0, 0, 0, 0, 0, 0,
            0x00, 0x82, 0x00, 0x01,
            0x00, 0x00,
            0x40, 0x00, 0x20, 0x00, 0x20, 0x00, 0x80, 0x00,
        ];

        let Glyph::Compound(glyph) = Glyph::from_data(&data).unwrap() else {
            panic!("expected a compound glyph");
        };

        let transform = glyph.components[0].transform;
        assert_eq!(transform.scale_x, 1.);
        assert_eq!(transform.scale_y, -2.);
    }

    #[test]
    fn point_matching_components() {
        #[rustfmt::skip]
        let data = [
            0xFF, 0xFF,
            0, 0, 0, 0, 0, 0, 0, 0,
            0x00, 0x00, 0x00, 0x03,
            0x01, 0x02,
        ];

        let Glyph::Compound(glyph) = Glyph::from_data(&data).unwrap() else {
            panic!("expected a compound glyph");
        };

        assert_eq!(
            glyph.components[0].alignment,
            ComponentAlignment::MatchPoints {
                compound_point: 1,
                component_point: 2
            }
        );
        assert_eq!(glyph.components[0].transform, ComponentTransform::IDENTITY);
    }

    #[test]
    fn identity_transform() {
        let p = point(-12, 345, false);
        assert_eq!(ComponentTransform::IDENTITY.apply(p), p);
    }

    #[test]
    fn transform_saturates() {
        let transform = ComponentTransform {
            scale_x: 2.,
            scale_y: 1.,
            offset_x: i32::MAX,
            offset_y: i32::MIN,
        };

        let moved = transform.apply(point(i32::MAX, -1, true));
        assert_eq!((moved.x, moved.y), (i32::MAX, i32::MIN));
    }
}
