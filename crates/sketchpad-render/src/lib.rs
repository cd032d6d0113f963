//! # Sketchpad Renderer
//!
//! Turns kernel shapes into pixel data for a canvas. Shapes are culled
//! against the viewport, clipped (Cohen-Sutherland or Liang-Barsky) and scan
//! converted (DDA or Bresenham). The output is JSON-serializable so any
//! front end can blit it.

pub mod clip;
pub mod raster;
pub mod render_data;
pub mod viewport;

pub use clip::{clip_edges, clip_polygon, cohen_sutherland, liang_barsky, ClipAlgorithm, ClippedLine};
pub use raster::{
    bresenham_circle, bresenham_line, dda_line, round_half_up, BresenhamCircle, BresenhamLine,
    DdaLine, RasterAlgorithm,
};
pub use render_data::{RenderFrame, RenderOptions, RenderShape};
pub use viewport::Viewport;
