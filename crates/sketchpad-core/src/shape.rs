use serde::{Deserialize, Serialize};

use crate::geometry::{BBox, Point};
use crate::hit;
use crate::transform::{radius_scale, Axis, Transform};

/// Color assigned to shapes created without one.
pub const DEFAULT_COLOR: &str = "#000000";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// A standalone point marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    #[serde(flatten)]
    pub position: Point,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub selected: bool,
}

impl Dot {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            color: default_color(),
            selected: false,
        }
    }
}

/// A straight segment. `start` and `end` may coincide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub selected: bool,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            color: default_color(),
            selected: false,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// A polygon whose last vertex implicitly connects back to the first.
///
/// With fewer than three vertices it is an open polyline: it draws, but it
/// has no interior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(rename = "points")]
    pub vertices: Vec<Point>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub selected: bool,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self {
            vertices,
            color: default_color(),
            selected: false,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// True once the polygon has an interior (three or more vertices).
    pub fn is_closed(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Edges in vertex order, `v[i] -> v[(i + 1) % n]`. Two vertices yield a
    /// single edge; zero or one vertex yields none.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        let count = match n {
            0 | 1 => 0,
            2 => 1,
            _ => n,
        };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn add_vertex(&mut self, vertex: Point) {
        self.vertices.push(vertex);
    }
}

/// A circle outline. The radius is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub selected: bool,
}

impl Circle {
    /// A negative radius is clamped to zero.
    pub fn new(center: Point, radius: f64) -> Self {
        let radius = if radius < 0.0 {
            log::warn!("Negative circle radius {} clamped to 0", radius);
            0.0
        } else {
            radius
        };
        Self {
            center,
            radius,
            color: default_color(),
            selected: false,
        }
    }
}

/// Any primitive on the canvas.
///
/// Serialized as `{"type": "...", "data": {...}}`, the record shape used by
/// saved sketches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Shape {
    Point(Dot),
    Line(Line),
    Polygon(Polygon),
    Circle(Circle),
}

impl Shape {
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Point(_) => "point",
            Shape::Line(_) => "line",
            Shape::Polygon(_) => "polygon",
            Shape::Circle(_) => "circle",
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.set_color(color);
        self
    }

    // ── Colorable ────────────────────────────────────────────────────

    pub fn color(&self) -> &str {
        match self {
            Shape::Point(s) => &s.color,
            Shape::Line(s) => &s.color,
            Shape::Polygon(s) => &s.color,
            Shape::Circle(s) => &s.color,
        }
    }

    pub fn set_color(&mut self, color: &str) {
        let slot = match self {
            Shape::Point(s) => &mut s.color,
            Shape::Line(s) => &mut s.color,
            Shape::Polygon(s) => &mut s.color,
            Shape::Circle(s) => &mut s.color,
        };
        *slot = color.to_string();
    }

    // ── Selectable ───────────────────────────────────────────────────

    pub fn is_selected(&self) -> bool {
        match self {
            Shape::Point(s) => s.selected,
            Shape::Line(s) => s.selected,
            Shape::Polygon(s) => s.selected,
            Shape::Circle(s) => s.selected,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        match self {
            Shape::Point(s) => s.selected = selected,
            Shape::Line(s) => s.selected = selected,
            Shape::Polygon(s) => s.selected = selected,
            Shape::Circle(s) => s.selected = selected,
        }
    }

    pub fn select(&mut self) {
        self.set_selected(true);
    }

    pub fn deselect(&mut self) {
        self.set_selected(false);
    }

    pub fn toggle_select(&mut self) {
        let selected = self.is_selected();
        self.set_selected(!selected);
    }

    // ── Transformable ────────────────────────────────────────────────

    /// Apply `transform` to every coordinate the shape owns. A circle moves
    /// its center; only scaling changes its radius.
    pub fn apply(&mut self, transform: &Transform) {
        match self {
            Shape::Point(s) => s.position = transform.apply(&s.position),
            Shape::Line(s) => {
                s.start = transform.apply(&s.start);
                s.end = transform.apply(&s.end);
            }
            Shape::Polygon(s) => {
                for v in &mut s.vertices {
                    *v = transform.apply(v);
                }
            }
            Shape::Circle(s) => {
                s.center = transform.apply(&s.center);
                if let Transform::Scale {
                    scale_x, scale_y, ..
                } = *transform
                {
                    s.radius *= radius_scale(scale_x, scale_y);
                }
            }
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.apply(&Transform::translate(dx, dy));
    }

    pub fn rotate(&mut self, angle_degrees: f64, origin: Point) {
        self.apply(&Transform::rotate(angle_degrees, origin));
    }

    pub fn scale(&mut self, scale_x: f64, scale_y: f64, origin: Point) {
        self.apply(&Transform::scale(scale_x, scale_y, origin));
    }

    pub fn reflect(&mut self, axis: Axis, origin: Point) {
        self.apply(&Transform::reflect(axis, origin));
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Axis-aligned bounds of the owned coordinates. `None` for a polygon
    /// without vertices.
    pub fn bbox(&self) -> Option<BBox> {
        match self {
            Shape::Point(s) => Some(BBox::new(s.position, s.position)),
            Shape::Line(s) => Some(BBox::from_corners(s.start, s.end)),
            Shape::Polygon(s) => BBox::from_points(&s.vertices),
            Shape::Circle(s) => Some(BBox::new(
                s.center.translate(-s.radius, -s.radius),
                s.center.translate(s.radius, s.radius),
            )),
        }
    }

    /// Snap-relevant points: the point itself, line endpoints, polygon
    /// vertices, circle center.
    pub fn vertices(&self) -> Vec<Point> {
        match self {
            Shape::Point(s) => vec![s.position],
            Shape::Line(s) => vec![s.start, s.end],
            Shape::Polygon(s) => s.vertices.clone(),
            Shape::Circle(s) => vec![s.center],
        }
    }

    /// Whether a click at `(x, y)` picks this shape. Polygons use even-odd
    /// containment and ignore `threshold`; every other shape is picked when
    /// the click lands within `threshold` of its outline.
    pub fn contains(&self, x: f64, y: f64, threshold: f64) -> bool {
        let p = Point::new(x, y);
        match self {
            Shape::Point(s) => hit::point_near_point(&p, &s.position, threshold),
            Shape::Line(s) => hit::point_near_segment(&p, &s.start, &s.end, threshold),
            Shape::Polygon(s) => hit::point_in_polygon(&p, &s.vertices),
            Shape::Circle(s) => hit::point_near_circle(&p, &s.center, s.radius, threshold),
        }
    }
}

impl From<Dot> for Shape {
    fn from(s: Dot) -> Self {
        Shape::Point(s)
    }
}

impl From<Line> for Shape {
    fn from(s: Line) -> Self {
        Shape::Line(s)
    }
}

impl From<Polygon> for Shape {
    fn from(s: Polygon) -> Self {
        Shape::Polygon(s)
    }
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Shape::Circle(s)
    }
}
