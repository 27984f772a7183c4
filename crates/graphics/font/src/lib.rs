//! TrueType font parsing library.
//!
//! Loads the tables needed to map characters to glyphs and turns glyph outlines
//! (including compound glyphs) into closed paths of lines and quadratic bezier curves.
//! Hinting, rasterization and shaping are not covered.

pub mod outline;
pub mod path;
mod stream;
pub mod ttf;
pub mod ttf_tables;

pub use outline::{BoundingBox, ResolvedOutline};
pub use path::{Operation, Path, PathConsumer, PathPoint, PathReader, Segment};
pub use stream::{Readable, Stream, StreamError, Tag};
pub use ttf::{Font, TTFParseError};
pub use ttf_tables::cmap::GlyphID;
