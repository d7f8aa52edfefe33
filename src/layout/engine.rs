//! The family tree layout engine.
//!
//! `FamilyTreeLayout` holds only its configuration; every call builds a
//! fresh layout from the caller's snapshot, so identical inputs always give
//! identical outputs. The two operations live in `ancestors.rs` and
//! `descendants.rs`; this file carries the pieces they share.

use super::config::FamilyLayoutConfig;
use super::types::{LayoutEdge, LayoutNode, NodeType, TreeLayout};
use crate::family::Profile;

/// Anchor point on a card edge.
pub(crate) type Anchor = (f64, f64);

/// Pure ancestor/descendant layout engine.
#[derive(Debug, Clone, Default)]
pub struct FamilyTreeLayout {
    pub(crate) config: FamilyLayoutConfig,
}

impl FamilyTreeLayout {
    /// Create a layout engine with the given configuration.
    pub fn new(config: FamilyLayoutConfig) -> Self {
        Self { config }
    }

    /// Create a layout engine with the default card geometry.
    pub fn with_defaults() -> Self {
        Self::new(FamilyLayoutConfig::default())
    }

    pub fn config(&self) -> &FamilyLayoutConfig {
        &self.config
    }

    /// Midpoint of the card's top edge.
    #[inline]
    pub(crate) fn top_center(&self, x: f64, y: f64) -> Anchor {
        (x + self.config.node_width / 2.0, y)
    }

    /// Midpoint of the card's bottom edge.
    #[inline]
    pub(crate) fn bottom_center(&self, x: f64, y: f64) -> Anchor {
        (x + self.config.node_width / 2.0, y + self.config.node_height)
    }

    pub(crate) fn connector(
        &self,
        from: Anchor,
        to: Anchor,
        anim_delay: u32,
        dashed: bool,
    ) -> LayoutEdge {
        LayoutEdge {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            anim_delay,
            dashed,
        }
    }

    /// Card on the subject's row at an integer column (siblings, spouses).
    pub(crate) fn side_node(
        &self,
        profile: &Profile,
        column: usize,
        row_y: f64,
        node_type: NodeType,
    ) -> LayoutNode {
        LayoutNode {
            profile: profile.clone(),
            depth: 0,
            x: self.config.column_x(column as f64),
            y: row_y,
            anim_delay: self.config.side_node_delay,
            node_type,
        }
    }

    /// Append spouse cards to the right of `tree_columns` and size the canvas.
    pub(crate) fn finish(
        &self,
        mut nodes: Vec<LayoutNode>,
        edges: Vec<LayoutEdge>,
        spouses: &[Profile],
        tree_columns: usize,
        max_depth: u32,
        root_row_y: f64,
    ) -> TreeLayout {
        let tree_columns = tree_columns.max(1);
        for (j, spouse) in spouses.iter().enumerate() {
            nodes.push(self.side_node(spouse, tree_columns + j, root_row_y, NodeType::Spouse));
        }

        TreeLayout {
            nodes,
            edges,
            width: self.config.canvas_width(tree_columns + spouses.len()),
            height: self.config.canvas_height(max_depth + 1),
            node_width: self.config.node_width,
            node_height: self.config.node_height,
        }
    }
}

/// Role of a card on the tree proper.
#[inline]
pub(crate) fn tree_node_type(depth: u32) -> NodeType {
    if depth == 0 {
        NodeType::Root
    } else {
        NodeType::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors() {
        let engine = FamilyTreeLayout::with_defaults();
        assert_eq!(engine.top_center(40.0, 170.0), (124.0, 170.0));
        assert_eq!(engine.bottom_center(40.0, 40.0), (124.0, 110.0));
    }

    #[test]
    fn test_finish_places_spouses_right_of_tree() {
        let engine = FamilyTreeLayout::with_defaults();
        let spouses = [Profile::new(4, "Sophie", "Martin"), Profile::new(5, "Anne", "Roy")];
        let layout = engine.finish(Vec::new(), Vec::new(), &spouses, 2, 0, 40.0);

        assert_eq!(layout.nodes.len(), 2);
        assert_eq!(layout.nodes[0].x, 2.0 * 192.0 + 40.0);
        assert_eq!(layout.nodes[1].x, 3.0 * 192.0 + 40.0);
        assert!(layout.nodes.iter().all(|n| n.node_type == NodeType::Spouse));
        assert!(layout.nodes.iter().all(|n| n.anim_delay == 80 && n.depth == 0));
        assert_eq!(layout.width, 4.0 * 192.0 - 24.0 + 80.0);
        assert_eq!(layout.height, 150.0);
    }

    #[test]
    fn test_custom_config_flows_into_output() {
        let engine = FamilyTreeLayout::new(FamilyLayoutConfig {
            node_width: 100.0,
            node_height: 50.0,
            ..Default::default()
        });
        let layout = engine.finish(Vec::new(), Vec::new(), &[], 0, 0, 40.0);
        assert_eq!(layout.node_width, 100.0);
        assert_eq!(layout.node_height, 50.0);
        assert_eq!(layout.width, 100.0 + 80.0);
        assert_eq!(layout.height, 50.0 + 80.0);
    }
}
