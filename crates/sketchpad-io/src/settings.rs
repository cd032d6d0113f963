use serde::{Deserialize, Serialize};
use thiserror::Error;

use sketchpad_core::hit::DEFAULT_PICK_RADIUS;
use sketchpad_core::{Point, Shape, Sketch, SnapPoint, DEFAULT_COLOR};
use sketchpad_render::{ClipAlgorithm, RasterAlgorithm, RenderOptions, Viewport};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Canvas size must be positive, got {width}x{height}")]
    InvalidCanvasSize { width: f64, height: f64 },
}

/// Canvas and interaction settings. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
    /// Radius the canvas draws point markers with, in pixels. Only the front
    /// end reads it; render frames carry a point as its center pixel.
    pub point_radius: f64,
    /// Pick distance for clicks.
    pub hit_threshold: f64,
    /// Pick distance for snapping.
    pub snap_threshold: f64,
    /// Color given to shapes added through [`CanvasSettings::add_shape`].
    pub default_color: String,
    pub raster_algorithm: RasterAlgorithm,
    pub clip_algorithm: ClipAlgorithm,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            point_radius: 5.0,
            hit_threshold: DEFAULT_PICK_RADIUS,
            snap_threshold: 10.0,
            default_color: DEFAULT_COLOR.to_string(),
            raster_algorithm: RasterAlgorithm::Bresenham,
            clip_algorithm: ClipAlgorithm::CohenSutherland,
        }
    }
}

impl CanvasSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        if !(settings.width > 0.0 && settings.height > 0.0) {
            return Err(SettingsError::InvalidCanvasSize {
                width: settings.width,
                height: settings.height,
            });
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The full canvas rectangle.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_canvas(self.width, self.height)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            raster_algorithm: self.raster_algorithm,
            clip_algorithm: self.clip_algorithm,
        }
    }

    /// Add a freshly drawn shape in the current default color.
    pub fn add_shape(&self, sketch: &mut Sketch, shape: impl Into<Shape>) -> usize {
        sketch.add(shape.into().with_color(&self.default_color))
    }

    /// Click selection using `hit_threshold`.
    pub fn click_select(&self, sketch: &mut Sketch, x: f64, y: f64) -> Option<usize> {
        sketch.click_select(x, y, self.hit_threshold)
    }

    /// Snap lookup using `snap_threshold`.
    pub fn snap(
        &self,
        sketch: &Sketch,
        x: f64,
        y: f64,
        anchor: Option<Point>,
    ) -> Option<SnapPoint> {
        sketch.snap(x, y, self.snap_threshold, anchor)
    }
}
