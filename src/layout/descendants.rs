//! Descendant layout.
//!
//! The subject sits on the top row and descendants grow downward. A
//! childless person takes the next leaf column; a parent is centred between
//! its first and last child only, so with three or more children of uneven
//! subtree width the parent is not over the mean of all of them.
//!
//! Siblings are not part of a descendant diagram and are never drawn here.

use super::engine::{FamilyTreeLayout, tree_node_type};
use super::types::{LayoutEdge, LayoutNode, TreeLayout};
use crate::family::{DescendantNode, Profile};

/// Internal node data for one person of the descendant tree.
struct LineageSlot<'a> {
    profile: &'a Profile,
    /// Generations below the subject (subject = 0).
    depth: u32,
    /// Children slot indices, in the order given by the service.
    children: Vec<usize>,
    column: f64,
    x: f64,
    y: f64,
}

impl FamilyTreeLayout {
    /// Lay out the descendants of `root`, with its spouses beside it.
    ///
    /// Nodes come out in post-order followed by the spouses; edges come out
    /// in pre-order.
    pub fn layout_descendants(&self, root: &DescendantNode, spouses: &[Profile]) -> TreeLayout {
        let mut slots: Vec<LineageSlot<'_>> = Vec::new();
        let root_idx = Self::build_lineage(root, 0, &mut slots);
        let max_depth = slots.iter().map(|s| s.depth).max().unwrap_or(0);

        let mut next_leaf = 0usize;
        let mut post_order = Vec::with_capacity(slots.len());
        Self::assign_lineage_columns(root_idx, &mut slots, &mut next_leaf, &mut post_order);

        let mut nodes: Vec<LayoutNode> = Vec::with_capacity(slots.len() + spouses.len());
        for &v in &post_order {
            let slot = &mut slots[v];
            slot.x = self.config.column_x(slot.column);
            slot.y = self.config.row_y(slot.depth);
            nodes.push(LayoutNode {
                profile: slot.profile.clone(),
                depth: slot.depth,
                x: slot.x,
                y: slot.y,
                anim_delay: self.config.node_delay(slot.depth),
                node_type: tree_node_type(slot.depth),
            });
        }

        let mut edges = Vec::with_capacity(slots.len() - 1);
        self.collect_lineage_edges(root_idx, &slots, &mut edges);

        let root_row_y = self.config.row_y(0);
        self.finish(nodes, edges, spouses, next_leaf, max_depth, root_row_y)
    }

    /// Flatten the tree into `slots` in pre-order; returns the slot index.
    fn build_lineage<'a>(
        node: &'a DescendantNode,
        depth: u32,
        slots: &mut Vec<LineageSlot<'a>>,
    ) -> usize {
        let idx = slots.len();
        slots.push(LineageSlot {
            profile: &node.profile,
            depth,
            children: Vec::with_capacity(node.children.len()),
            column: 0.0,
            x: 0.0,
            y: 0.0,
        });

        for child in &node.children {
            let child_idx = Self::build_lineage(child, depth + 1, slots);
            slots[idx].children.push(child_idx);
        }
        idx
    }

    fn assign_lineage_columns(
        v: usize,
        slots: &mut [LineageSlot<'_>],
        next_leaf: &mut usize,
        post_order: &mut Vec<usize>,
    ) -> f64 {
        // Clone children indices to avoid borrow conflict during recursion
        let children = slots[v].children.clone();

        let column = if children.is_empty() {
            let col = *next_leaf as f64;
            *next_leaf += 1;
            col
        } else {
            let child_cols: Vec<f64> = children
                .iter()
                .map(|&c| Self::assign_lineage_columns(c, slots, next_leaf, post_order))
                .collect();
            (child_cols[0] + child_cols[child_cols.len() - 1]) / 2.0
        };

        slots[v].column = column;
        post_order.push(v);
        column
    }

    /// Parent bottom-center to child top-center, in pre-order.
    fn collect_lineage_edges(
        &self,
        v: usize,
        slots: &[LineageSlot<'_>],
        edges: &mut Vec<LayoutEdge>,
    ) {
        let parent = &slots[v];
        let from = self.bottom_center(parent.x, parent.y);
        for &c in &parent.children {
            let child = &slots[c];
            let to = self.top_center(child.x, child.y);
            edges.push(self.connector(from, to, self.config.edge_delay_from(parent.depth), false));
            self.collect_lineage_edges(c, slots, edges);
        }
    }
}
