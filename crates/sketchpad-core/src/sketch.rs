use uuid::Uuid;

use crate::geometry::Point;
use crate::selection::{self, SelectMode, SnapPoint};
use crate::shape::Shape;
use crate::transform::Transform;

/// The ordered collection of shapes on one canvas.
///
/// Insertion order is paint order; the last shape is on top.
#[derive(Debug, Clone)]
pub struct Sketch {
    /// Document identifier.
    pub id: Uuid,
    /// Document name.
    pub name: String,
    shapes: Vec<Shape>,
}

impl Sketch {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            shapes: Vec::new(),
        }
    }

    // ── Shape management ─────────────────────────────────────────────

    /// Append a shape on top and return its index.
    pub fn add(&mut self, shape: impl Into<Shape>) -> usize {
        self.shapes.push(shape.into());
        self.shapes.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<Shape> {
        if index < self.shapes.len() {
            Some(self.shapes.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Replace every shape, keeping the document identity.
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        log::debug!(
            "Sketch '{}': replacing {} shapes with {}",
            self.name,
            self.shapes.len(),
            shapes.len()
        );
        self.shapes = shapes;
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn select_all(&mut self) {
        self.shapes.iter_mut().for_each(Shape::select);
    }

    pub fn deselect_all(&mut self) {
        self.shapes.iter_mut().for_each(Shape::deselect);
    }

    pub fn toggle_select(&mut self, index: usize) {
        if let Some(shape) = self.shapes.get_mut(index) {
            shape.toggle_select();
        }
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_selected())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn select_in_rect(&mut self, corner_a: Point, corner_b: Point, mode: SelectMode) -> usize {
        selection::select_in_rect(&mut self.shapes, corner_a, corner_b, mode)
    }

    /// Select only the topmost shape under the cursor, or clear the
    /// selection when nothing is hit. Returns the picked index.
    pub fn click_select(&mut self, x: f64, y: f64, threshold: f64) -> Option<usize> {
        let picked = self.find_shape_at(x, y, threshold);
        self.deselect_all();
        if let Some(index) = picked {
            self.shapes[index].select();
        }
        picked
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Index of the topmost shape picked at `(x, y)`.
    pub fn find_shape_at(&self, x: f64, y: f64, threshold: f64) -> Option<usize> {
        selection::find_topmost_index(x, y, &self.shapes, threshold)
    }

    pub fn snap(&self, x: f64, y: f64, threshold: f64, anchor: Option<Point>) -> Option<SnapPoint> {
        selection::find_snap_point(x, y, &self.shapes, threshold, anchor)
    }

    // ── Edits on the selection ───────────────────────────────────────

    pub fn transform_selected(&mut self, transform: &Transform) {
        let mut count = 0;
        for shape in self.shapes.iter_mut().filter(|s| s.is_selected()) {
            shape.apply(transform);
            count += 1;
        }
        log::debug!("Applied {:?} to {} selected shapes", transform, count);
    }

    pub fn translate_selected(&mut self, dx: f64, dy: f64) {
        self.transform_selected(&Transform::translate(dx, dy));
    }

    /// Remove every selected shape and return how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| !s.is_selected());
        let removed = before - self.shapes.len();
        log::debug!("Deleted {} selected shapes", removed);
        removed
    }

    pub fn set_color_for_selected(&mut self, color: &str) {
        for shape in self.shapes.iter_mut().filter(|s| s.is_selected()) {
            shape.set_color(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Circle, Dot, Line, Polygon};

    fn populated() -> Sketch {
        let mut sketch = Sketch::new("test");
        sketch.add(Dot::new(10.0, 10.0));
        sketch.add(Line::new(Point::new(0.0, 50.0), Point::new(100.0, 50.0)));
        sketch.add(Polygon::new(vec![
            Point::new(200.0, 200.0),
            Point::new(300.0, 200.0),
            Point::new(250.0, 300.0),
        ]));
        sketch.add(Circle::new(Point::new(500.0, 500.0), 40.0));
        sketch
    }

    #[test]
    fn test_sketch_create() {
        let sketch = Sketch::new("drawing");
        assert_eq!(sketch.name, "drawing");
        assert!(sketch.is_empty());
    }

    #[test]
    fn test_add_returns_paint_order_index() {
        let sketch = populated();
        assert_eq!(sketch.len(), 4);
        assert_eq!(sketch.get(3).map(Shape::type_name), Some("circle"));
    }

    #[test]
    fn test_click_select_replaces_selection() {
        let mut sketch = populated();
        sketch.select_all();
        assert_eq!(sketch.click_select(50.0, 52.0, 5.0), Some(1));
        assert_eq!(sketch.selected_indices(), vec![1]);
        assert_eq!(sketch.click_select(-500.0, -500.0, 5.0), None);
        assert!(sketch.selected_indices().is_empty());
    }

    #[test]
    fn test_transform_only_selected() {
        let mut sketch = populated();
        sketch.toggle_select(0);
        sketch.translate_selected(5.0, -5.0);
        assert_eq!(sketch.get(0).unwrap().vertices(), vec![Point::new(15.0, 5.0)]);
        assert_eq!(
            sketch.get(1).unwrap().vertices(),
            vec![Point::new(0.0, 50.0), Point::new(100.0, 50.0)]
        );
    }

    #[test]
    fn test_delete_and_recolor_selected() {
        let mut sketch = populated();
        sketch.select_in_rect(
            Point::new(150.0, 150.0),
            Point::new(600.0, 600.0),
            SelectMode::Replace,
        );
        assert_eq!(sketch.selected_indices(), vec![2, 3]);

        sketch.set_color_for_selected("#00ff00");
        assert_eq!(sketch.get(3).unwrap().color(), "#00ff00");
        assert_eq!(sketch.get(0).unwrap().color(), "#000000");

        assert_eq!(sketch.delete_selected(), 2);
        assert_eq!(sketch.len(), 2);
        assert!(sketch.selected_indices().is_empty());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut sketch = populated();
        assert!(sketch.remove(10).is_none());
        assert!(sketch.remove(0).is_some());
        assert_eq!(sketch.len(), 3);
    }
}
