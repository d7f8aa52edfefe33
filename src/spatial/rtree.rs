//! R-tree over laid-out cards using the rstar crate.
//!
//! Provides O(log n) queries for:
//! - Card under the pointer
//! - Cards intersecting a viewport rectangle
//! - Card nearest to a point

use rstar::{AABB, Envelope, PointDistance, RTree, RTreeObject};

use crate::layout::TreeLayout;

/// One card's box in the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardBox {
    /// Index into `TreeLayout::nodes`.
    pub index: usize,
    /// Top-left corner.
    pub min: [f64; 2],
    /// Bottom-right corner.
    pub max: [f64; 2],
}

impl CardBox {
    /// Create a box from its top-left corner and size.
    pub fn new(index: usize, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            index,
            min: [x, y],
            max: [x + width, y + height],
        }
    }
}

impl RTreeObject for CardBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PointDistance for CardBox {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.envelope().distance_2(point)
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.envelope().contains_point(point)
    }
}

/// Spatial index for the cards of one layout.
///
/// Uses an R*-tree for efficient spatial queries.
pub struct SpatialIndex {
    tree: RTree<CardBox>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk load every card of `layout`.
    pub fn from_layout(layout: &TreeLayout) -> Self {
        let mut index = Self::new();
        index.rebuild(layout);
        index
    }

    /// Replace the indexed cards with those of `layout`.
    pub fn rebuild(&mut self, layout: &TreeLayout) {
        let boxes: Vec<_> = layout
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| CardBox::new(i, n.x, n.y, layout.node_width, layout.node_height))
            .collect();

        self.tree = RTree::bulk_load(boxes);
    }

    /// Card under a point. When boxes overlap, the one drawn last wins.
    pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
        self.tree
            .locate_all_at_point(&[x, y])
            .map(|card| card.index)
            .max()
    }

    /// Cards whose box intersects the rectangle, in drawing order.
    pub fn nodes_in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<usize> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|card| card.index)
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Card whose box is closest to a point (0 distance when inside).
    pub fn nearest(&self, x: f64, y: f64) -> Option<usize> {
        self.tree.nearest_neighbor(&[x, y]).map(|card| card.index)
    }

    /// Clear all cards from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Get the number of cards in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
