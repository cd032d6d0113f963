use serde::{Deserialize, Serialize};

use sketchpad_core::{BBox, Point};

/// Axis-aligned clip rectangle in canvas coordinates.
///
/// Supplied per call by the canvas; the kernel never keeps one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Viewport {
    /// Build from two opposite corners in any order.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x_min: x0.min(x1),
            y_min: y0.min(y1),
            x_max: x0.max(x1),
            y_max: y0.max(y1),
        }
    }

    /// The whole canvas, `[0, width] x [0, height]`.
    pub fn from_canvas(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    pub fn contains_pixel(&self, x: i32, y: i32) -> bool {
        self.contains(&Point::new(f64::from(x), f64::from(y)))
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(
            Point::new(self.x_min, self.y_min),
            Point::new(self.x_max, self.y_max),
        )
    }
}

impl From<BBox> for Viewport {
    fn from(bb: BBox) -> Self {
        Self::new(bb.min.x, bb.min.y, bb.max.x, bb.max.y)
    }
}
