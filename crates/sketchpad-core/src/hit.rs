//! Hit-testing predicates.
//!
//! All predicates are total: degenerate geometry (zero-length segments,
//! polygons with fewer than three vertices) falls back to a well-defined
//! answer instead of failing.

use crate::geometry::Point;

/// Default pick radius around points and lines, in canvas pixels.
pub const DEFAULT_PICK_RADIUS: f64 = 5.0;

/// True when `p` lies within `radius` of `q` (inclusive). Compares squared
/// distances.
pub fn point_near_point(p: &Point, q: &Point, radius: f64) -> bool {
    p.distance_sq_to(q) <= radius * radius
}

/// The point on segment `a..b` closest to `p`.
///
/// A zero-length segment returns `a`.
pub fn closest_point_on_segment(p: &Point, a: &Point, b: &Point) -> Point {
    let cx = b.x - a.x;
    let cy = b.y - a.y;
    let len_sq = cx * cx + cy * cy;
    if len_sq == 0.0 {
        return *a;
    }

    let t = ((p.x - a.x) * cx + (p.y - a.y) * cy) / len_sq;
    if t < 0.0 {
        *a
    } else if t > 1.0 {
        *b
    } else {
        Point::new(a.x + t * cx, a.y + t * cy)
    }
}

/// True when `p` is strictly closer than `threshold` to segment `a..b`.
pub fn point_near_segment(p: &Point, a: &Point, b: &Point, threshold: f64) -> bool {
    closest_point_on_segment(p, a, b).distance_to(p) < threshold
}

/// Even-odd containment by casting a horizontal ray to the right of `p`.
///
/// Returns false for fewer than three vertices. Points on the boundary get
/// whatever the crossing rule yields: left and bottom edges count as inside,
/// right and top edges as outside.
pub fn point_in_polygon(p: &Point, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (vertices[i].x, vertices[i].y);
        let (xj, yj) = (vertices[j].x, vertices[j].y);

        if (yi > p.y) != (yj > p.y) && p.x < (xj - xi) * (p.y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// True when `p` lies within `threshold` of the circle's boundary (not its
/// interior).
pub fn point_near_circle(p: &Point, center: &Point, radius: f64, threshold: f64) -> bool {
    (p.distance_to(center) - radius).abs() <= threshold
}

/// Projection of `p` onto the circle's perimeter, or `None` when `p` sits on
/// the center and every perimeter point is equally close.
pub fn project_onto_circle(p: &Point, center: &Point, radius: f64) -> Option<Point> {
    let dist = p.distance_to(center);
    if dist == 0.0 {
        return None;
    }
    let k = radius / dist;
    Some(Point::new(
        center.x + (p.x - center.x) * k,
        center.y + (p.y - center.y) * k,
    ))
}
