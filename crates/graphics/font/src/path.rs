//! Conversion of glyph contours into closed paths of lines and quadratic bezier curves.

use crate::{outline::ResolvedOutline, ttf_tables::glyf::GlyphPoint};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathPoint {
    pub x: f32,
    pub y: f32,
}

impl PathPoint {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn mid(p0: Self, p1: Self) -> Self {
        Self {
            x: (p0.x + p1.x) / 2.,
            y: (p0.y + p1.y) / 2.,
        }
    }
}

impl From<GlyphPoint> for PathPoint {
    fn from(value: GlyphPoint) -> Self {
        Self {
            x: value.x as f32,
            y: value.y as f32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    MoveTo(PathPoint),
    LineTo(PathPoint),
    /// Control point, then end point
    QuadBezTo(PathPoint, PathPoint),
    Close,
}

/// One piece of a [Path], starting wherever the previous segment ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Line(PathPoint),
    /// Control point, then end point
    QuadBez(PathPoint, PathPoint),
}

impl Segment {
    #[must_use]
    pub fn end(&self) -> PathPoint {
        match self {
            Self::Line(end) | Self::QuadBez(_, end) => *end,
        }
    }
}

/// A closed path built from a single contour.
///
/// The last segment always ends at [Path::start].
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    start: PathPoint,
    segments: Vec<Segment>,
}

impl Path {
    /// Returns `None` for contours without any points.
    #[must_use]
    pub fn from_contour(points: &[GlyphPoint]) -> Option<Self> {
        let first = *points.first()?;
        let last = *points.last()?;

        // Paths must start on the curve. If the first point is a control point then
        // we start at the last point instead, or in between the two if that is a control
        // point too.
        let (start, remaining_points) = if first.is_on_curve {
            (first.into(), &points[1..])
        } else if last.is_on_curve {
            (last.into(), &points[..points.len() - 1])
        } else {
            (PathPoint::mid(last.into(), first.into()), points)
        };

        let mut builder = PathBuilder::new(start);
        for &point in remaining_points {
            builder.push(point.into(), point.is_on_curve);
        }
        Some(builder.close())
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> PathPoint {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Get the n-th operation needed to draw the path.
    ///
    /// The first operation is always a [Operation::MoveTo] and the last one is always
    /// [Operation::Close].
    #[must_use]
    pub fn operation(&self, index: usize) -> Option<Operation> {
        if index == 0 {
            return Some(Operation::MoveTo(self.start));
        }

        match self.segments.get(index - 1) {
            Some(Segment::Line(end)) => Some(Operation::LineTo(*end)),
            Some(Segment::QuadBez(control, end)) => Some(Operation::QuadBezTo(*control, *end)),
            None if index == self.segments.len() + 1 => Some(Operation::Close),
            None => None,
        }
    }

    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        (0..).map_while(|index| self.operation(index))
    }

    pub fn replay<C: PathConsumer>(&self, consumer: &mut C) {
        for operation in self.operations() {
            match operation {
                Operation::MoveTo(p) => consumer.move_to(p),
                Operation::LineTo(p) => consumer.line_to(p),
                Operation::QuadBezTo(p1, p2) => consumer.quad_bez_to(p1, p2),
                Operation::Close => consumer.close(),
            }
        }
    }
}

struct PathBuilder {
    start: PathPoint,
    current: PathPoint,
    pending_control_point: Option<PathPoint>,
    segments: Vec<Segment>,
}

impl PathBuilder {
    fn new(start: PathPoint) -> Self {
        Self {
            start,
            current: start,
            pending_control_point: None,
            segments: vec![],
        }
    }

    fn push(&mut self, point: PathPoint, is_on_curve: bool) {
        match (self.pending_control_point, is_on_curve) {
            (None, true) => {
                // Consecutive on-curve points are connected by a line
                self.add_segment(Segment::Line(point));
            },
            (None, false) => {
                // Start of a bezier curve, we need the next point to know where it ends
                self.pending_control_point = Some(point);
            },
            (Some(control_point), true) => {
                self.add_segment(Segment::QuadBez(control_point, point));
                self.pending_control_point = None;
            },
            (Some(control_point), false) => {
                // If multiple off-curve points occur consecutively, we insert a linearly
                // interpolated mid point (on-curve) between them
                let mid_point = PathPoint::mid(control_point, point);
                self.add_segment(Segment::QuadBez(control_point, mid_point));
                self.pending_control_point = Some(point);
            },
        }
    }

    fn add_segment(&mut self, segment: Segment) {
        self.current = segment.end();
        self.segments.push(segment);
    }

    fn close(mut self) -> Path {
        let needs_closing_segment =
            self.pending_control_point.is_some() || self.current != self.start;

        if needs_closing_segment {
            self.push(self.start, true);
        }

        Path {
            start: self.start,
            segments: self.segments,
        }
    }
}

/// Iterates over the drawing operations of every contour in an outline.
pub struct PathReader {
    paths: std::vec::IntoIter<Path>,
    current_path: Option<Path>,
    next_operation: usize,
}

impl PathReader {
    #[must_use]
    pub fn new(outline: &ResolvedOutline) -> Self {
        Self {
            paths: outline.paths().into_iter(),
            current_path: None,
            next_operation: 0,
        }
    }
}

impl Iterator for PathReader {
    type Item = Operation;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(operation) = self
                .current_path
                .as_ref()
                .and_then(|path| path.operation(self.next_operation))
            {
                self.next_operation += 1;
                return Some(operation);
            }

            // We're done with the current path, move on to the next one
            self.current_path = Some(self.paths.next()?);
            self.next_operation = 0;
        }
    }
}

pub trait PathConsumer {
    fn move_to(&mut self, p: PathPoint);
    fn line_to(&mut self, p: PathPoint);
    fn quad_bez_to(&mut self, p1: PathPoint, p2: PathPoint);
    fn close(&mut self);
}
