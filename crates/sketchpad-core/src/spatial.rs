use rstar::{RTree, RTreeObject, AABB};

use crate::geometry::BBox;
use crate::shape::Shape;

/// An entry in the R-tree spatial index, referencing a shape by its index.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    /// Index into the shape collection.
    pub shape_index: usize,
    /// Bounding box of the shape.
    pub bbox: BBox,
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bbox.min.x, self.bbox.min.y],
            [self.bbox.max.x, self.bbox.max.y],
        )
    }
}

/// Spatial index for viewport culling and pick candidates.
///
/// The index is a snapshot: rebuild it after shapes move.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    /// Build the index from a list of bounding boxes.
    pub fn build(entries: Vec<SpatialEntry>) -> Self {
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Index every shape that has a bounding box. Shapes with non-finite
    /// coordinates are left out.
    pub fn from_shapes(shapes: &[Shape]) -> Self {
        let entries = shapes
            .iter()
            .enumerate()
            .filter_map(|(shape_index, shape)| {
                let bbox = shape.bbox()?;
                (bbox.min.is_finite() && bbox.max.is_finite())
                    .then_some(SpatialEntry { shape_index, bbox })
            })
            .collect();
        Self::build(entries)
    }

    /// Indices of shapes whose bounding box intersects `viewport`. Sorted in
    /// collection order so callers keep paint order.
    pub fn query_viewport(&self, viewport: &BBox) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [viewport.min.x, viewport.min.y],
            [viewport.max.x, viewport.max.y],
        );
        let mut indices: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|e| e.shape_index)
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Number of entries in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::shape::{Circle, Dot, Line, Polygon};

    #[test]
    fn test_spatial_query() {
        let entries = vec![
            SpatialEntry {
                shape_index: 0,
                bbox: BBox::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0)),
            },
            SpatialEntry {
                shape_index: 1,
                bbox: BBox::new(Point::new(20.0, 20.0), Point::new(30.0, 30.0)),
            },
        ];
        let index = SpatialIndex::build(entries);

        let at = |x: f64, y: f64, margin: f64| {
            index.query_viewport(&BBox::new(Point::new(x, y), Point::new(x, y)).expand(margin))
        };
        assert_eq!(at(5.0, 5.0, 0.0), vec![0]);
        assert_eq!(at(25.0, 25.0, 0.0), vec![1]);
        assert!(at(15.0, 15.0, 0.0).is_empty());
        assert_eq!(at(15.0, 15.0, 5.0), vec![0, 1]);

        let viewport = BBox::new(Point::new(-5.0, -5.0), Point::new(15.0, 15.0));
        assert_eq!(index.query_viewport(&viewport), vec![0]);
    }

    #[test]
    fn test_from_shapes_skips_empty_polygons() {
        let shapes = vec![
            Shape::Point(Dot::new(1.0, 1.0)),
            Shape::Polygon(Polygon::new(Vec::new())),
            Shape::Line(Line::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0))),
            Shape::Circle(Circle::new(Point::new(500.0, 500.0), 10.0)),
        ];
        let index = SpatialIndex::from_shapes(&shapes);
        assert_eq!(index.len(), 3);

        let viewport = BBox::new(Point::new(0.0, 0.0), Point::new(50.0, 50.0));
        assert_eq!(index.query_viewport(&viewport), vec![0, 2]);
    }
}
