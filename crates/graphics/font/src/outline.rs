//! Flattening of compound glyphs into plain outlines.
//!
//! A compound glyph is made up of references to other glyphs, each of which may be
//! compound itself. Resolving one produces the outline you would get by placing every
//! referenced simple glyph at its transformed position.

use std::rc::Rc;

use crate::{
    path::Path,
    ttf::TTFParseError,
    ttf_tables::{
        cmap::GlyphID,
        glyf::{
            self, ComponentAlignment, ComponentTransform, CompoundGlyph, Glyph, GlyphPoint,
            SimpleGlyph,
        },
    },
};

/// Upper bound for compound nesting, regardless of what the font claims to need.
pub const MAX_COMPONENT_DEPTH: usize = 64;

/// Compound glyphs with more points than this are rejected.
///
/// Point indices are 16 bit wide, so no real glyph comes close.
pub const MAX_OUTLINE_POINTS: usize = u16::MAX as usize;

/// A glyph outline without any references to other glyphs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedOutline {
    points: Vec<GlyphPoint>,

    /// Index of the last point of each contour, strictly increasing
    end_points_of_contours: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl ResolvedOutline {
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[GlyphPoint] {
        &self.points
    }

    #[inline]
    #[must_use]
    pub fn end_points_of_contours(&self) -> &[usize] {
        &self.end_points_of_contours
    }

    #[inline]
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn num_contours(&self) -> usize {
        self.end_points_of_contours.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contours(&self) -> impl Iterator<Item = &[GlyphPoint]> + '_ {
        glyf::contours(&self.points, &self.end_points_of_contours)
    }

    /// One closed path per contour.
    pub fn paths(&self) -> Vec<Path> {
        self.contours().filter_map(Path::from_contour).collect()
    }

    /// The smallest box containing all points (including off-curve ones).
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let initial = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };

        Some(self.points.iter().fold(initial, |bounds, point| BoundingBox {
            min_x: bounds.min_x.min(point.x),
            min_y: bounds.min_y.min(point.y),
            max_x: bounds.max_x.max(point.x),
            max_y: bounds.max_y.max(point.y),
        }))
    }

    /// Add the contours of `other` after our own, with `transform` applied to each point.
    fn append(&mut self, other: &Self, transform: &ComponentTransform) {
        let point_offset = self.points.len();

        self.points
            .extend(other.points.iter().map(|&point| transform.apply(point)));
        self.end_points_of_contours.extend(
            other
                .end_points_of_contours
                .iter()
                .map(|end_point| end_point + point_offset),
        );
    }
}

impl From<&SimpleGlyph> for ResolvedOutline {
    fn from(glyph: &SimpleGlyph) -> Self {
        Self {
            points: glyph.points.clone(),
            end_points_of_contours: glyph
                .end_points_of_contours
                .iter()
                .map(|&end_point| end_point as usize)
                .collect(),
        }
    }
}

/// Everything needed to resolve compound glyphs.
///
/// Outlines are cached once resolved, so glyphs that are shared between many compound
/// glyphs are only flattened once. The chain of compound glyphs that are currently being
/// resolved is passed along explicitly.
#[derive(Clone, Debug)]
pub struct ResolutionContext<'a> {
    glyphs: &'a [Glyph],
    max_depth: usize,
    resolved: Vec<Option<Rc<ResolvedGlyph>>>,
}

#[derive(Debug)]
struct ResolvedGlyph {
    outline: ResolvedOutline,

    /// Number of nested compound levels needed to resolve the glyph, zero for simple glyphs
    depth: usize,
}

impl<'a> ResolutionContext<'a> {
    /// `max_component_depth` is taken from the `maxp` table.
    ///
    /// Fonts that claim to need no nesting at all still get one level, since
    /// a compound glyph always references at least one other glyph.
    #[must_use]
    pub fn new(glyphs: &'a [Glyph], max_component_depth: u16) -> Self {
        Self {
            glyphs,
            max_depth: (max_component_depth as usize).clamp(1, MAX_COMPONENT_DEPTH),
            resolved: vec![None; glyphs.len()],
        }
    }

    #[inline]
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn resolve(&mut self, glyph_id: GlyphID) -> Result<ResolvedOutline, TTFParseError> {
        let mut active_glyphs = Vec::new();
        let resolved = self.resolve_nested(glyph_id, &mut active_glyphs)?;
        Ok(resolved.outline.clone())
    }

    fn resolve_nested(
        &mut self,
        glyph_id: GlyphID,
        active_glyphs: &mut Vec<GlyphID>,
    ) -> Result<Rc<ResolvedGlyph>, TTFParseError> {
        let index = glyph_id.numeric() as usize;
        let glyphs = self.glyphs;
        let glyph = glyphs
            .get(index)
            .ok_or(TTFParseError::GlyphIndexOutOfRange(glyph_id))?;

        // A cached outline can only be reused if it still fits below the current chain.
        // Otherwise resolve it again so the error names the glyph that is nested too deep.
        if let Some(Some(resolved)) = self.resolved.get(index) {
            if active_glyphs.len() + resolved.depth <= self.max_depth {
                return Ok(Rc::clone(resolved));
            }
        }

        let resolved = Rc::new(match glyph {
            Glyph::Simple(simple_glyph) => ResolvedGlyph {
                outline: simple_glyph.into(),
                depth: 0,
            },
            Glyph::Compound(compound_glyph) => {
                self.resolve_compound(glyph_id, compound_glyph, active_glyphs)?
            },
        });

        if let Some(slot) = self.resolved.get_mut(index) {
            *slot = Some(Rc::clone(&resolved));
        }
        Ok(resolved)
    }

    fn resolve_compound(
        &mut self,
        glyph_id: GlyphID,
        compound_glyph: &CompoundGlyph,
        active_glyphs: &mut Vec<GlyphID>,
    ) -> Result<ResolvedGlyph, TTFParseError> {
        if active_glyphs.contains(&glyph_id) || active_glyphs.len() >= self.max_depth {
            return Err(TTFParseError::CompoundCycleOrDepthExceeded(glyph_id));
        }

        active_glyphs.push(glyph_id);

        let mut outline = ResolvedOutline::default();
        let mut depth = 0;
        for component in &compound_glyph.components {
            if let ComponentAlignment::MatchPoints { .. } = component.alignment {
                return Err(TTFParseError::UnsupportedComponentAlignment(glyph_id));
            }

            let resolved = self.resolve_nested(component.glyph_index, active_glyphs)?;
            if outline.num_points() + resolved.outline.num_points() > MAX_OUTLINE_POINTS {
                return Err(TTFParseError::CompoundCycleOrDepthExceeded(glyph_id));
            }

            outline.append(&resolved.outline, &component.transform);
            depth = depth.max(resolved.depth);
        }

        active_glyphs.pop();
        Ok(ResolvedGlyph {
            outline,
            depth: depth + 1,
        })
    }
}
