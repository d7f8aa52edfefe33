//! Ancestor (pedigree) layout.
//!
//! The subject sits on the bottom row and ancestors grow upward. Columns
//! come from a post-order fold over the pedigree:
//!
//! 1. A person with no known parents takes the next free leaf column.
//! 2. A person with one known parent takes that parent's column.
//! 3. A person with both parents known sits at the midpoint of their
//!    columns, which may be fractional.
//!
//! The leaf counter starts at the number of siblings so the siblings own the
//! leftmost columns of the subject's row. Spouses follow to the right of all
//! ancestor columns.

use super::engine::{FamilyTreeLayout, tree_node_type};
use super::types::{LayoutEdge, LayoutNode, NodeType, TreeLayout};
use crate::family::{AncestorNode, Profile};

/// Internal node data for one person of the pedigree.
struct PedigreeSlot<'a> {
    profile: &'a Profile,
    /// Generations above the subject (subject = 0).
    depth: u32,
    /// Father slot index.
    father: Option<usize>,
    /// Mother slot index.
    mother: Option<usize>,
    /// Column from the post-order fold.
    column: f64,
    /// Final card position.
    x: f64,
    y: f64,
}

impl FamilyTreeLayout {
    /// Lay out the ancestors of `root` with its siblings and spouses.
    ///
    /// Nodes come out in post-order (father subtree, mother subtree, person),
    /// followed by the siblings and then the spouses. Tree edges come out in
    /// pre-order; each sibling's dashed edges follow the tree edges in
    /// sibling order.
    pub fn layout_ancestors(
        &self,
        root: &AncestorNode,
        siblings: &[Profile],
        spouses: &[Profile],
    ) -> TreeLayout {
        let mut slots: Vec<PedigreeSlot<'_>> = Vec::new();
        let root_idx = Self::build_pedigree(root, 0, &mut slots);

        let max_depth = slots.iter().map(|s| s.depth).max().unwrap_or(0);
        let root_row_y = self.config.row_y(max_depth);

        let mut next_leaf = siblings.len();
        let mut post_order = Vec::with_capacity(slots.len());
        Self::assign_columns(root_idx, &mut slots, &mut next_leaf, &mut post_order);

        let mut nodes: Vec<LayoutNode> =
            Vec::with_capacity(slots.len() + siblings.len() + spouses.len());
        for &v in &post_order {
            let slot = &mut slots[v];
            slot.x = self.config.column_x(slot.column);
            slot.y = self.config.row_y(max_depth - slot.depth);
            nodes.push(LayoutNode {
                profile: slot.profile.clone(),
                depth: slot.depth,
                x: slot.x,
                y: slot.y,
                anim_delay: self.config.node_delay(slot.depth),
                node_type: tree_node_type(slot.depth),
            });
        }

        let mut edges = Vec::with_capacity(slots.len() - 1 + siblings.len() * 2);
        self.collect_edges(root_idx, &slots, &mut edges);

        // Siblings share the subject's parents, not the subject's lineage
        let parent_anchors: Vec<_> = [slots[root_idx].father, slots[root_idx].mother]
            .into_iter()
            .flatten()
            .map(|p| self.bottom_center(slots[p].x, slots[p].y))
            .collect();

        for (i, sibling) in siblings.iter().enumerate() {
            let card = self.side_node(sibling, i, root_row_y, NodeType::Sibling);
            let from = self.top_center(card.x, card.y);
            nodes.push(card);
            for &to in &parent_anchors {
                edges.push(self.connector(from, to, self.config.sibling_edge_delay, true));
            }
        }

        self.finish(nodes, edges, spouses, next_leaf, max_depth, root_row_y)
    }

    /// Flatten the pedigree into `slots` in pre-order; returns the slot index.
    fn build_pedigree<'a>(
        node: &'a AncestorNode,
        depth: u32,
        slots: &mut Vec<PedigreeSlot<'a>>,
    ) -> usize {
        let idx = slots.len();
        slots.push(PedigreeSlot {
            profile: &node.profile,
            depth,
            father: None,
            mother: None,
            column: 0.0,
            x: 0.0,
            y: 0.0,
        });

        let father = node
            .father
            .as_deref()
            .map(|f| Self::build_pedigree(f, depth + 1, slots));
        let mother = node
            .mother
            .as_deref()
            .map(|m| Self::build_pedigree(m, depth + 1, slots));

        slots[idx].father = father;
        slots[idx].mother = mother;
        idx
    }

    /// Post-order column fold. Records the visit order in `post_order`.
    fn assign_columns(
        v: usize,
        slots: &mut [PedigreeSlot<'_>],
        next_leaf: &mut usize,
        post_order: &mut Vec<usize>,
    ) -> f64 {
        let (father, mother) = (slots[v].father, slots[v].mother);
        let father_col = father.map(|f| Self::assign_columns(f, slots, next_leaf, post_order));
        let mother_col = mother.map(|m| Self::assign_columns(m, slots, next_leaf, post_order));

        let column = match (father_col, mother_col) {
            (None, None) => {
                let col = *next_leaf as f64;
                *next_leaf += 1;
                col
            }
            (Some(f), Some(m)) => (f + m) / 2.0,
            (Some(only), None) | (None, Some(only)) => only,
        };

        slots[v].column = column;
        post_order.push(v);
        column
    }

    /// Child top-center to parent bottom-center, father before mother, in
    /// pre-order.
    fn collect_edges(&self, v: usize, slots: &[PedigreeSlot<'_>], edges: &mut Vec<LayoutEdge>) {
        let child = &slots[v];
        let from = self.top_center(child.x, child.y);
        for p in [child.father, child.mother].into_iter().flatten() {
            let parent = &slots[p];
            let to = self.bottom_center(parent.x, parent.y);
            edges.push(self.connector(from, to, self.config.edge_delay_from(child.depth), false));
            self.collect_edges(p, slots, edges);
        }
    }
}
