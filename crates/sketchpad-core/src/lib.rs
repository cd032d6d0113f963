//! # Sketchpad Core
//!
//! Shape primitives for the Sketchpad vector canvas: points, lines, polygons
//! and circles, their affine transforms, hit-testing predicates, rectangle
//! selection, snapping, and an R-tree for culling.
//!
//! Everything here is synchronous and holds no global state; shapes are
//! owned by the caller and mutated in place.

pub mod geometry;
pub mod shape;
pub mod transform;
pub mod hit;
pub mod selection;
pub mod spatial;
pub mod sketch;

pub use geometry::{BBox, Point};
pub use shape::{Circle, Dot, Line, Polygon, Shape, DEFAULT_COLOR};
pub use transform::{Axis, Transform};
pub use selection::{SelectMode, SnapKind, SnapPoint};
pub use spatial::SpatialIndex;
pub use sketch::Sketch;
