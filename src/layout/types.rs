//! Layout output: positioned cards, connector curves and canvas size.

use serde::Serialize;

use crate::family::{Profile, ProfileId};

/// Role of a card in the diagram, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// The subject of the diagram.
    Root,
    /// A sibling of the subject (ancestor view only).
    Sibling,
    /// A spouse of the subject.
    Spouse,
    /// Any ancestor or descendant.
    Default,
}

/// A positioned person card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub profile: Profile,
    /// Generations from the subject (0 = subject, siblings and spouses).
    pub depth: u32,
    /// Left edge of the card.
    pub x: f64,
    /// Top edge of the card.
    pub y: f64,
    /// Staggered-entrance hint in milliseconds.
    pub anim_delay: u32,
    pub node_type: NodeType,
}

/// One connector between two card anchor points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub anim_delay: u32,
    /// Sibling-to-parent connectors are drawn dashed.
    pub dashed: bool,
}

impl LayoutEdge {
    /// Y coordinate both control points share.
    #[inline]
    pub fn mid_y(&self) -> f64 {
        (self.y1 + self.y2) / 2.0
    }

    /// SVG path data for the vertically symmetric S-curve.
    ///
    /// Both control points sit on the vertical midpoint regardless of the
    /// horizontal distance between the anchors.
    pub fn path_data(&self) -> String {
        let mid_y = self.mid_y();
        format!(
            "M {},{} C {},{} {},{} {},{}",
            self.x1, self.y1, self.x1, mid_y, self.x2, mid_y, self.x2, self.y2
        )
    }
}

/// A complete diagram: every card, every connector and the canvas size.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    /// Canvas width.
    #[serde(rename = "w")]
    pub width: f64,
    /// Canvas height.
    #[serde(rename = "h")]
    pub height: f64,
    /// Card size the positions were computed with.
    pub node_width: f64,
    pub node_height: f64,
}

impl TreeLayout {
    /// First card showing `id`, if any.
    pub fn find_node(&self, id: ProfileId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.profile.id == id)
    }

    /// Cards of the given role.
    pub fn nodes_of_type(&self, node_type: NodeType) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter().filter(move |n| n.node_type == node_type)
    }

    /// Interleaved card positions `[x0, y0, x1, y1, ...]`.
    pub fn positions(&self) -> Vec<f64> {
        let mut positions = Vec::with_capacity(self.nodes.len() * 2);
        for node in &self.nodes {
            positions.push(node.x);
            positions.push(node.y);
        }
        positions
    }
}
