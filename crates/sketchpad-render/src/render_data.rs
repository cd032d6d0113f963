use serde::{Deserialize, Serialize};

use sketchpad_core::{BBox, Point, Shape, SpatialIndex};

use crate::clip::{self, ClipAlgorithm};
use crate::raster::{round_half_up, BresenhamCircle, RasterAlgorithm};
use crate::Viewport;

/// Algorithm choices for building a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    pub raster_algorithm: RasterAlgorithm,
    pub clip_algorithm: ClipAlgorithm,
}

/// Pixels for one shape, ready for the canvas compositor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderShape {
    /// Index into the shape collection (paint order).
    pub shape_index: usize,
    /// "point", "line", "polygon" or "circle".
    pub kind: String,
    pub color: String,
    /// Whether this shape is currently selected.
    pub selected: bool,
    /// Outline pixels, already clipped to the viewport.
    pub pixels: Vec<(i32, i32)>,
    /// Fill approximation for closed polygons: the clipped edges' endpoints
    /// in the polygon's edge order. Empty for every other shape.
    pub fill_outline: Vec<Point>,
}

/// Complete render frame data sent to the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub shapes: Vec<RenderShape>,
    pub viewport: Viewport,
    pub selection_bbox: Option<[f64; 4]>, // [min_x, min_y, max_x, max_y]
}

impl RenderFrame {
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            shapes: Vec::new(),
            viewport,
            selection_bbox: None,
        }
    }

    /// Clip and rasterize every shape whose bounds touch `viewport`.
    pub fn build(shapes: &[Shape], viewport: Viewport, options: RenderOptions) -> Self {
        let mut frame = Self::empty(viewport);

        let index = SpatialIndex::from_shapes(shapes);
        let visible = index.query_viewport(&viewport.bbox());
        log::debug!(
            "Rendering {} of {} shapes in {:?}",
            visible.len(),
            shapes.len(),
            viewport
        );

        for shape_index in visible {
            let shape = &shapes[shape_index];
            let (pixels, fill_outline) = rasterize_shape(shape, &viewport, options);
            if pixels.is_empty() && fill_outline.is_empty() {
                continue;
            }
            frame.shapes.push(RenderShape {
                shape_index,
                kind: shape.type_name().to_string(),
                color: shape.color().to_string(),
                selected: shape.is_selected(),
                pixels,
                fill_outline,
            });
        }

        frame.selection_bbox = shapes
            .iter()
            .filter(|s| s.is_selected())
            .filter_map(Shape::bbox)
            .reduce(|a, b| a.union(&b))
            .map(|bb: BBox| [bb.min.x, bb.min.y, bb.max.x, bb.max.y]);

        frame
    }

    pub fn pixel_count(&self) -> usize {
        self.shapes.iter().map(|s| s.pixels.len()).sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn rasterize_shape(
    shape: &Shape,
    viewport: &Viewport,
    options: RenderOptions,
) -> (Vec<(i32, i32)>, Vec<Point>) {
    let mut pixels = Vec::new();
    let mut fill_outline = Vec::new();

    match shape {
        Shape::Point(dot) => {
            let (x, y) = (round_half_up(dot.position.x), round_half_up(dot.position.y));
            if viewport.contains_pixel(x, y) {
                pixels.push((x, y));
            }
        }
        Shape::Line(line) => {
            if let Some(visible) = options.clip_algorithm.clip(line.start, line.end, viewport) {
                pixels.extend(rasterize_segment(visible.start, visible.end, viewport, options));
            }
        }
        Shape::Polygon(polygon) => {
            let edges = clip::clip_polygon(polygon, viewport, options.clip_algorithm);
            for edge in &edges {
                pixels.extend(rasterize_segment(edge.start, edge.end, viewport, options));
            }
            if polygon.is_closed() {
                for edge in &edges {
                    for p in [edge.start, edge.end] {
                        if fill_outline.last() != Some(&p) {
                            fill_outline.push(p);
                        }
                    }
                }
            }
        }
        Shape::Circle(circle) => {
            if !ring_touches_viewport(circle.center, circle.radius, viewport) {
                return (pixels, fill_outline);
            }
            if !fits_pixel_grid(circle.center, circle.radius) {
                log::warn!(
                    "Circle at {:?} with radius {} exceeds the pixel grid, skipped",
                    circle.center,
                    circle.radius
                );
                return (pixels, fill_outline);
            }
            let circle_pixels = BresenhamCircle::new(
                round_half_up(circle.center.x),
                round_half_up(circle.center.y),
                round_half_up(circle.radius),
            );
            pixels.extend(circle_pixels.filter(|&(x, y)| viewport.contains_pixel(x, y)));
        }
    }

    (pixels, fill_outline)
}

/// Slack for center rounding and the rasterizer's one-pixel radius error.
const RING_SLACK: f64 = 2.0;

/// False when the outline cannot reach the viewport: the viewport lies
/// entirely inside the circle, or entirely outside it.
fn ring_touches_viewport(center: Point, radius: f64, viewport: &Viewport) -> bool {
    let near_x = (viewport.x_min - center.x).max(center.x - viewport.x_max).max(0.0);
    let near_y = (viewport.y_min - center.y).max(center.y - viewport.y_max).max(0.0);
    let far_x = (center.x - viewport.x_min).abs().max((center.x - viewport.x_max).abs());
    let far_y = (center.y - viewport.y_min).abs().max((center.y - viewport.y_max).abs());

    near_x.hypot(near_y) <= radius + RING_SLACK && far_x.hypot(far_y) >= radius - RING_SLACK
}

fn fits_pixel_grid(center: Point, radius: f64) -> bool {
    let limit = f64::from(i32::MAX);
    center.x.abs() + radius < limit && center.y.abs() + radius < limit
}

/// Rounding a clipped endpoint can push it half a pixel past the viewport
/// edge; those pixels are dropped.
fn rasterize_segment<'a>(
    start: Point,
    end: Point,
    viewport: &'a Viewport,
    options: RenderOptions,
) -> impl Iterator<Item = (i32, i32)> + 'a {
    options
        .raster_algorithm
        .line(
            round_half_up(start.x),
            round_half_up(start.y),
            round_half_up(end.x),
            round_half_up(end.y),
        )
        .filter(move |&(x, y)| viewport.contains_pixel(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpad_core::{Circle, Dot, Line, Polygon};

    fn viewport() -> Viewport {
        Viewport::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_offscreen_shapes_are_culled() {
        let shapes = vec![
            Shape::Point(Dot::new(500.0, 500.0)),
            Shape::Line(Line::new(Point::new(-50.0, -50.0), Point::new(-10.0, -10.0))),
            Shape::Point(Dot::new(10.0, 10.0)),
        ];
        let frame = RenderFrame::build(&shapes, viewport(), RenderOptions::default());
        assert_eq!(frame.shapes.len(), 1);
        assert_eq!(frame.shapes[0].shape_index, 2);
        assert_eq!(frame.shapes[0].pixels, vec![(10, 10)]);

        let json = frame.to_json().unwrap();
        assert!(json.contains(r#""pixels":[[10,10]]"#));
        assert!(json.contains(r#""kind":"point""#));
    }

    #[test]
    fn test_line_is_clipped_before_rasterizing() {
        let shapes = vec![Shape::Line(Line::new(
            Point::new(-50.0, 50.0),
            Point::new(150.0, 50.0),
        ))];
        for raster_algorithm in [RasterAlgorithm::Dda, RasterAlgorithm::Bresenham] {
            let options = RenderOptions {
                raster_algorithm,
                clip_algorithm: ClipAlgorithm::LiangBarsky,
            };
            let frame = RenderFrame::build(&shapes, viewport(), options);
            let pixels = &frame.shapes[0].pixels;
            assert_eq!(pixels.len(), 101);
            assert!(pixels.iter().all(|&(x, y)| (0..=100).contains(&x) && y == 50));
        }
    }

    #[test]
    fn test_polygon_fill_outline_follows_clipped_edges() {
        let mut square = Polygon::new(vec![
            Point::new(50.0, 50.0),
            Point::new(150.0, 50.0),
            Point::new(150.0, 150.0),
            Point::new(50.0, 150.0),
        ]);
        square.color = "#336699".to_string();
        let shapes = vec![Shape::Polygon(square)];
        let frame = RenderFrame::build(&shapes, viewport(), RenderOptions::default());

        let rendered = &frame.shapes[0];
        assert_eq!(rendered.kind, "polygon");
        assert_eq!(rendered.color, "#336699");
        assert_eq!(
            rendered.fill_outline,
            vec![
                Point::new(50.0, 50.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 100.0),
                Point::new(50.0, 50.0),
            ]
        );
        // Bottom edge 50..=100 plus left edge 100..=50.
        assert_eq!(rendered.pixels.len(), 102);
    }

    #[test]
    fn test_fractional_viewport_drops_rounded_overshoot() {
        let shapes = vec![Shape::Line(Line::new(
            Point::new(0.0, 10.0),
            Point::new(50.0, 10.0),
        ))];
        let vp = Viewport::new(0.0, 0.0, 20.6, 20.0);
        let frame = RenderFrame::build(&shapes, vp, RenderOptions::default());
        let pixels = &frame.shapes[0].pixels;
        assert_eq!(pixels.len(), 21);
        assert!(pixels.iter().all(|&(x, _)| x <= 20));
    }

    #[test]
    fn test_open_polyline_has_no_fill() {
        let shapes = vec![Shape::Polygon(Polygon::new(vec![
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
        ]))];
        let frame = RenderFrame::build(&shapes, viewport(), RenderOptions::default());
        assert!(frame.shapes[0].fill_outline.is_empty());
        assert_eq!(frame.shapes[0].pixels.len(), 11);
    }

    #[test]
    fn test_circle_pixels_stay_inside_viewport() {
        let shapes = vec![Shape::Circle(Circle::new(Point::new(0.0, 50.0), 20.0))];
        let frame = RenderFrame::build(&shapes, viewport(), RenderOptions::default());
        let pixels = &frame.shapes[0].pixels;
        assert!(!pixels.is_empty());
        assert!(pixels.iter().all(|&(x, _)| x >= 0));
        assert!(pixels.contains(&(20, 50)));
    }

    #[test]
    fn test_selection_bbox_spans_selected_shapes() {
        let mut shapes = vec![
            Shape::Point(Dot::new(10.0, 20.0)),
            Shape::Circle(Circle::new(Point::new(60.0, 60.0), 5.0)),
            Shape::Point(Dot::new(90.0, 90.0)),
        ];
        shapes[0].select();
        shapes[1].select();
        let frame = RenderFrame::build(&shapes, viewport(), RenderOptions::default());
        assert_eq!(frame.selection_bbox, Some([10.0, 20.0, 65.0, 65.0]));
        assert!(frame.shapes[0].selected);
        assert!(!frame.shapes[2].selected);
        // Two single-pixel points plus the full ring.
        let ring = BresenhamCircle::new(60, 60, 5).count();
        assert_eq!(ring, 40);
        assert_eq!(frame.pixel_count(), ring + 2);
    }

    #[test]
    fn test_circle_enclosing_viewport_is_skipped() {
        let shapes = vec![
            Shape::Circle(Circle::new(Point::new(50.0, 50.0), 3.0e9)),
            Shape::Circle(Circle::new(Point::new(50.0, 50.0), 1.0e8)),
            Shape::Circle(Circle::new(Point::new(50.0, 50.0), 80.0)),
        ];
        let frame = RenderFrame::build(&shapes, viewport(), RenderOptions::default());
        assert!(frame.shapes.is_empty());
    }

    #[test]
    fn test_large_circle_crossing_viewport_is_drawn() {
        // Ring passes through x = 50 across the whole viewport height.
        let shapes = vec![Shape::Circle(Circle::new(Point::new(-950.0, 50.0), 1_000.0))];
        let frame = RenderFrame::build(&shapes, viewport(), RenderOptions::default());
        let pixels = &frame.shapes[0].pixels;
        assert!(pixels.contains(&(50, 50)));
        assert!(pixels.iter().all(|&(x, y)| (0..=100).contains(&x) && (0..=100).contains(&y)));
    }

    #[test]
    fn test_ring_touches_viewport() {
        let vp = viewport();
        assert!(ring_touches_viewport(Point::new(50.0, 50.0), 30.0, &vp));
        assert!(ring_touches_viewport(Point::new(-10.0, 50.0), 15.0, &vp));
        assert!(!ring_touches_viewport(Point::new(-50.0, 50.0), 20.0, &vp));
        assert!(!ring_touches_viewport(Point::new(50.0, 50.0), 75.0, &vp));
    }
}
