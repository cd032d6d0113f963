use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Reflection axis, taken relative to the reflection origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Mirror across the horizontal line through the origin (negates y).
    X,
    /// Mirror across the vertical line through the origin (negates x).
    Y,
    /// Mirror across the diagonal `y = x` through the origin (swaps x and y).
    XY,
}

/// An affine transformation requested by the editor for the current selection.
///
/// Serialized as the editor's flat record, e.g.
/// `{"type": "scale", "scaleX": 2, "scaleY": 2, "originX": 0, "originY": 0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransformRecord", into = "TransformRecord")]
pub enum Transform {
    Translate { dx: f64, dy: f64 },
    /// Rotation in degrees, counter-clockwise in a y-up frame.
    Rotate { angle: f64, origin: Point },
    Scale { scale_x: f64, scale_y: f64, origin: Point },
    Reflect { axis: Axis, origin: Point },
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
enum TransformRecord {
    Translate { dx: f64, dy: f64 },
    Rotate { angle: f64, origin_x: f64, origin_y: f64 },
    Scale { scale_x: f64, scale_y: f64, origin_x: f64, origin_y: f64 },
    Reflect { axis: Axis, origin_x: f64, origin_y: f64 },
}

impl From<TransformRecord> for Transform {
    fn from(record: TransformRecord) -> Self {
        match record {
            TransformRecord::Translate { dx, dy } => Transform::translate(dx, dy),
            TransformRecord::Rotate {
                angle,
                origin_x,
                origin_y,
            } => Transform::rotate(angle, Point::new(origin_x, origin_y)),
            TransformRecord::Scale {
                scale_x,
                scale_y,
                origin_x,
                origin_y,
            } => Transform::scale(scale_x, scale_y, Point::new(origin_x, origin_y)),
            TransformRecord::Reflect {
                axis,
                origin_x,
                origin_y,
            } => Transform::reflect(axis, Point::new(origin_x, origin_y)),
        }
    }
}

impl From<Transform> for TransformRecord {
    fn from(transform: Transform) -> Self {
        match transform {
            Transform::Translate { dx, dy } => TransformRecord::Translate { dx, dy },
            Transform::Rotate { angle, origin } => TransformRecord::Rotate {
                angle,
                origin_x: origin.x,
                origin_y: origin.y,
            },
            Transform::Scale {
                scale_x,
                scale_y,
                origin,
            } => TransformRecord::Scale {
                scale_x,
                scale_y,
                origin_x: origin.x,
                origin_y: origin.y,
            },
            Transform::Reflect { axis, origin } => TransformRecord::Reflect {
                axis,
                origin_x: origin.x,
                origin_y: origin.y,
            },
        }
    }
}

impl Transform {
    pub fn translate(dx: f64, dy: f64) -> Self {
        Transform::Translate { dx, dy }
    }

    pub fn rotate(angle: f64, origin: Point) -> Self {
        Transform::Rotate { angle, origin }
    }

    pub fn scale(scale_x: f64, scale_y: f64, origin: Point) -> Self {
        Transform::Scale {
            scale_x,
            scale_y,
            origin,
        }
    }

    pub fn reflect(axis: Axis, origin: Point) -> Self {
        Transform::Reflect { axis, origin }
    }

    pub fn apply(&self, point: &Point) -> Point {
        match *self {
            Transform::Translate { dx, dy } => point.translate(dx, dy),
            Transform::Rotate { angle, origin } => rotate_point(point, angle, &origin),
            Transform::Scale {
                scale_x,
                scale_y,
                origin,
            } => scale_point(point, scale_x, scale_y, &origin),
            Transform::Reflect { axis, origin } => reflect_point(point, axis, &origin),
        }
    }

    /// The transform that undoes this one, when it exists. Scaling by zero on
    /// either axis collapses coordinates and has no inverse.
    pub fn inverse(&self) -> Option<Self> {
        match *self {
            Transform::Translate { dx, dy } => Some(Transform::translate(-dx, -dy)),
            Transform::Rotate { angle, origin } => Some(Transform::rotate(-angle, origin)),
            Transform::Scale {
                scale_x,
                scale_y,
                origin,
            } => {
                if scale_x == 0.0 || scale_y == 0.0 {
                    None
                } else {
                    Some(Transform::scale(1.0 / scale_x, 1.0 / scale_y, origin))
                }
            }
            Transform::Reflect { .. } => Some(*self),
        }
    }
}

pub fn rotate_point(point: &Point, angle_degrees: f64, origin: &Point) -> Point {
    let rad = angle_degrees.to_radians();
    let (sin_r, cos_r) = rad.sin_cos();

    let x = point.x - origin.x;
    let y = point.y - origin.y;

    Point::new(
        x * cos_r - y * sin_r + origin.x,
        x * sin_r + y * cos_r + origin.y,
    )
}

pub fn scale_point(point: &Point, scale_x: f64, scale_y: f64, origin: &Point) -> Point {
    Point::new(
        origin.x + (point.x - origin.x) * scale_x,
        origin.y + (point.y - origin.y) * scale_y,
    )
}

pub fn reflect_point(point: &Point, axis: Axis, origin: &Point) -> Point {
    let x = point.x - origin.x;
    let y = point.y - origin.y;

    let (rx, ry) = match axis {
        Axis::X => (x, -y),
        Axis::Y => (-x, y),
        Axis::XY => (y, x),
    };

    Point::new(rx + origin.x, ry + origin.y)
}

/// Factor applied to a circle radius under a non-uniform scale.
pub fn radius_scale(scale_x: f64, scale_y: f64) -> f64 {
    (scale_x.abs() + scale_y.abs()) / 2.0
}
