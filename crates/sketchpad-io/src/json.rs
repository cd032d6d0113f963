//! JSON shape lists.
//!
//! A saved sketch is a flat array of `{"type": ..., "data": {...}}` records
//! in paint order. Missing `color` and `selected` fields fall back to their
//! defaults and unknown fields are ignored. Records of an unknown type are
//! skipped with a warning.

use serde_json::Value;
use thiserror::Error;

use sketchpad_core::{Shape, Sketch};

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Malformed shape JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Shape {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("Circle {index} has negative radius {radius}")]
    NegativeRadius { index: usize, radius: f64 },
}

// ── Encoding ──────────────────────────────────────────────────────────

pub fn shapes_to_json(shapes: &[Shape]) -> Result<String, LoadError> {
    Ok(serde_json::to_string(shapes)?)
}

pub fn shapes_to_json_pretty(shapes: &[Shape]) -> Result<String, LoadError> {
    Ok(serde_json::to_string_pretty(shapes)?)
}

// ── Decoding ──────────────────────────────────────────────────────────

const SHAPE_TYPES: [&str; 4] = ["point", "line", "polygon", "circle"];

/// Parse and validate a shape list. Error indices refer to positions in the
/// JSON array.
pub fn shapes_from_json(json: &str) -> Result<Vec<Shape>, LoadError> {
    let records: Vec<Value> = serde_json::from_str(json)?;
    let mut shapes = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        match record.get("type").and_then(Value::as_str) {
            Some(kind) if SHAPE_TYPES.contains(&kind) => {}
            kind => {
                log::warn!("Skipping record {} of unknown type {:?}", index, kind);
                continue;
            }
        }
        let shape: Shape = serde_json::from_value(record)?;
        validate(index, &shape)?;
        shapes.push(shape);
    }

    Ok(shapes)
}

/// Replace the contents of `sketch` with the shapes in `json`.
///
/// On any failure the sketch keeps its current shapes, the error is logged
/// and `false` is returned.
pub fn load_into(sketch: &mut Sketch, json: &str) -> bool {
    match shapes_from_json(json) {
        Ok(shapes) => {
            log::debug!("Loaded {} shapes into '{}'", shapes.len(), sketch.name);
            sketch.replace_shapes(shapes);
            true
        }
        Err(e) => {
            log::error!("Failed to load shapes into '{}': {}", sketch.name, e);
            false
        }
    }
}

fn validate(index: usize, shape: &Shape) -> Result<(), LoadError> {
    if !shape.vertices().iter().all(|p| p.is_finite()) {
        return Err(LoadError::NonFiniteCoordinate { index });
    }
    if let Shape::Circle(circle) = shape {
        if !circle.radius.is_finite() {
            return Err(LoadError::NonFiniteCoordinate { index });
        }
        if circle.radius < 0.0 {
            return Err(LoadError::NegativeRadius {
                index,
                radius: circle.radius,
            });
        }
    }
    Ok(())
}
