//! Range selection, snapping and picking over an ordered shape collection.
//!
//! The collection order is the paint order: later shapes are drawn on top.

use serde::{Deserialize, Serialize};

use crate::geometry::{BBox, Point};
use crate::hit;
use crate::shape::Shape;

/// How a rectangle selection combines with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectMode {
    /// Every shape's flag becomes "inside the rectangle".
    #[default]
    Replace,
    /// Shapes inside the rectangle are selected, others keep their flag.
    Extend,
}

/// What a snapped coordinate was derived from, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapKind {
    /// An existing point, endpoint, polygon vertex or circle center.
    Vertex,
    /// The closest point on a line or polygon edge.
    Edge,
    /// The projection onto a circle's perimeter.
    Perimeter,
    /// Same y as the anchor.
    Horizontal,
    /// Same x as the anchor.
    Vertical,
    /// On a 45° diagonal through the anchor.
    Diagonal,
}

/// A snapped coordinate offered in place of the raw cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapPoint {
    pub point: Point,
    pub kind: SnapKind,
    /// Index of the shape the snap came from; `None` for alignment guides.
    pub shape_index: Option<usize>,
}

/// Whether `shape` lies entirely within `rect`.
///
/// Points, lines and polygons are tested vertex by vertex (an empty polygon
/// never qualifies); circles by their bounding box.
pub fn shape_in_rect(shape: &Shape, rect: &BBox) -> bool {
    match shape {
        Shape::Point(s) => rect.contains_point(&s.position),
        Shape::Line(s) => rect.contains_point(&s.start) && rect.contains_point(&s.end),
        Shape::Polygon(s) => {
            !s.vertices.is_empty() && s.vertices.iter().all(|v| rect.contains_point(v))
        }
        Shape::Circle(_) => shape.bbox().is_some_and(|bb| rect.contains_bbox(&bb)),
    }
}

/// Select shapes inside the rectangle spanned by `corner_a` and `corner_b`.
/// The corners may come in any order. Returns the number of selected shapes
/// after the call.
pub fn select_in_rect(
    shapes: &mut [Shape],
    corner_a: Point,
    corner_b: Point,
    mode: SelectMode,
) -> usize {
    let rect = BBox::from_corners(corner_a, corner_b);
    for shape in shapes.iter_mut() {
        let inside = shape_in_rect(shape, &rect);
        match mode {
            SelectMode::Replace => shape.set_selected(inside),
            SelectMode::Extend if inside => shape.select(),
            SelectMode::Extend => {}
        }
    }
    shapes.iter().filter(|s| s.is_selected()).count()
}

/// Find a snap target near `(x, y)`.
///
/// Tiers are tried in [`SnapKind`] order and the first match wins; within a
/// tier, shapes are visited in collection order and the first one within
/// `threshold` is taken, even if a later one is closer. Alignment guides are
/// only offered when an `anchor` (the start of an in-progress segment) is
/// given.
pub fn find_snap_point(
    x: f64,
    y: f64,
    shapes: &[Shape],
    threshold: f64,
    anchor: Option<Point>,
) -> Option<SnapPoint> {
    let cursor = Point::new(x, y);

    // 1. Existing vertices.
    for (index, shape) in shapes.iter().enumerate() {
        if let Some(v) = shape
            .vertices()
            .into_iter()
            .find(|v| hit::point_near_point(&cursor, v, threshold))
        {
            return Some(SnapPoint {
                point: v,
                kind: SnapKind::Vertex,
                shape_index: Some(index),
            });
        }
    }

    // 2. Closest point on a segment or polygon edge.
    for (index, shape) in shapes.iter().enumerate() {
        let found = match shape {
            Shape::Line(s) => nearest_on_edge(&cursor, [(s.start, s.end)], threshold),
            Shape::Polygon(s) => nearest_on_edge(&cursor, s.edges(), threshold),
            _ => None,
        };
        if let Some(point) = found {
            return Some(SnapPoint {
                point,
                kind: SnapKind::Edge,
                shape_index: Some(index),
            });
        }
    }

    // 3. Circle perimeters.
    for (index, shape) in shapes.iter().enumerate() {
        let Shape::Circle(c) = shape else {
            continue;
        };
        if let Some(point) = hit::project_onto_circle(&cursor, &c.center, c.radius) {
            if point.distance_to(&cursor) <= threshold {
                return Some(SnapPoint {
                    point,
                    kind: SnapKind::Perimeter,
                    shape_index: Some(index),
                });
            }
        }
    }

    // 4. Alignment guides through the anchor.
    anchor.and_then(|a| alignment_guide(&cursor, &a, threshold))
}

fn nearest_on_edge(
    cursor: &Point,
    edges: impl IntoIterator<Item = (Point, Point)>,
    threshold: f64,
) -> Option<Point> {
    edges
        .into_iter()
        .map(|(a, b)| hit::closest_point_on_segment(cursor, &a, &b))
        .find(|p| p.distance_to(cursor) <= threshold)
}

fn alignment_guide(cursor: &Point, anchor: &Point, threshold: f64) -> Option<SnapPoint> {
    let guide = |point: Point, kind: SnapKind| SnapPoint {
        point,
        kind,
        shape_index: None,
    };

    if (cursor.y - anchor.y).abs() <= threshold {
        return Some(guide(Point::new(cursor.x, anchor.y), SnapKind::Horizontal));
    }
    if (cursor.x - anchor.x).abs() <= threshold {
        return Some(guide(Point::new(anchor.x, cursor.y), SnapKind::Vertical));
    }

    // Project onto the diagonal (1, 1) or anti-diagonal (1, -1) through the
    // anchor, whichever quadrant the cursor is in.
    let dx = cursor.x - anchor.x;
    let dy = cursor.y - anchor.y;
    let sign = if dx * dy >= 0.0 { 1.0 } else { -1.0 };
    let t = (dx + sign * dy) / 2.0;
    let on_diagonal = Point::new(anchor.x + t, anchor.y + sign * t);
    if on_diagonal.distance_to(cursor) <= threshold {
        return Some(guide(on_diagonal, SnapKind::Diagonal));
    }

    None
}

/// Index of the topmost shape picked by a click at `(x, y)`.
pub fn find_topmost_index(x: f64, y: f64, shapes: &[Shape], threshold: f64) -> Option<usize> {
    shapes
        .iter()
        .rposition(|shape| shape.contains(x, y, threshold))
}

/// The topmost shape picked by a click at `(x, y)`: the collection is walked
/// from last-added to first.
pub fn find_topmost_shape_at(x: f64, y: f64, shapes: &[Shape], threshold: f64) -> Option<&Shape> {
    find_topmost_index(x, y, shapes, threshold).map(|i| &shapes[i])
}
