//! TreeView - the diagram currently on screen.
//!
//! Owns the layout engine, the most recent layout and a spatial index over
//! its cards. Every `show_*` call recomputes the whole layout; there is no
//! incremental update.

use log::{debug, warn};
use serde::Serialize;

use crate::family::{AncestorNode, DescendantNode, MAX_GENERATIONS, Profile, ProfileId};
use crate::layout::{FamilyLayoutConfig, FamilyTreeLayout, TreeLayout};
use crate::spatial::SpatialIndex;

/// Text printed on one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLabel {
    pub id: ProfileId,
    pub name: String,
    /// `"1985"`, `"1955 – 2020"`, or empty when no year is known.
    pub lifespan: String,
}

/// The diagram state behind one tree canvas.
pub struct TreeView {
    engine: FamilyTreeLayout,

    /// Generations kept above or below the subject; `None` keeps everything.
    max_generations: Option<u32>,

    /// Layout of the last `show_*` call.
    layout: Option<TreeLayout>,

    /// Card index for `layout`.
    spatial: SpatialIndex,
}

impl TreeView {
    /// Create a view with the default card geometry.
    pub fn new() -> Self {
        Self::with_config(FamilyLayoutConfig::default())
    }

    pub fn with_config(config: FamilyLayoutConfig) -> Self {
        Self {
            engine: FamilyTreeLayout::new(config),
            max_generations: None,
            layout: None,
            spatial: SpatialIndex::new(),
        }
    }

    pub fn config(&self) -> &FamilyLayoutConfig {
        self.engine.config()
    }

    /// Limit how many generations are drawn, clamped to 1..=MAX_GENERATIONS.
    pub fn set_max_generations(&mut self, generations: Option<u32>) {
        self.max_generations = generations.map(|g| g.clamp(1, MAX_GENERATIONS));
    }

    pub fn max_generations(&self) -> Option<u32> {
        self.max_generations
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Lay out an ancestor diagram and make it current.
    pub fn show_ancestors(
        &mut self,
        root: &AncestorNode,
        siblings: &[Profile],
        spouses: &[Profile],
    ) -> &TreeLayout {
        let layout = match self.max_generations {
            Some(limit) if root.max_depth() > limit => {
                let (pruned, dropped) = root.truncated(limit);
                warn!(
                    "ancestor tree of {} exceeds {limit} generations, {dropped} people dropped",
                    root.profile.id
                );
                self.engine.layout_ancestors(&pruned, siblings, spouses)
            }
            _ => self.engine.layout_ancestors(root, siblings, spouses),
        };
        self.install(layout)
    }

    /// Lay out a descendant diagram and make it current.
    pub fn show_descendants(
        &mut self,
        root: &DescendantNode,
        spouses: &[Profile],
    ) -> &TreeLayout {
        let layout = match self.max_generations {
            Some(limit) if root.max_depth() > limit => {
                let (pruned, dropped) = root.truncated(limit);
                warn!(
                    "descendant tree of {} exceeds {limit} generations, {dropped} people dropped",
                    root.profile.id
                );
                self.engine.layout_descendants(&pruned, spouses)
            }
            _ => self.engine.layout_descendants(root, spouses),
        };
        self.install(layout)
    }

    fn install(&mut self, layout: TreeLayout) -> &TreeLayout {
        debug!(
            "tree layout: {} nodes, {} edges, {}x{}",
            layout.nodes.len(),
            layout.edges.len(),
            layout.width,
            layout.height
        );
        self.spatial.rebuild(&layout);
        self.layout.insert(layout)
    }

    /// The current layout, if any.
    pub fn layout(&self) -> Option<&TreeLayout> {
        self.layout.as_ref()
    }

    /// Drop the current layout.
    pub fn clear(&mut self) {
        self.layout = None;
        self.spatial.clear();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Person whose card is under the point.
    pub fn profile_at(&self, x: f64, y: f64) -> Option<ProfileId> {
        let layout = self.layout.as_ref()?;
        self.spatial
            .node_at(x, y)
            .map(|i| layout.nodes[i].profile.id)
    }

    /// Person whose card is closest to the point, for clicks that miss.
    pub fn nearest_profile(&self, x: f64, y: f64) -> Option<ProfileId> {
        let layout = self.layout.as_ref()?;
        self.spatial
            .nearest(x, y)
            .map(|i| layout.nodes[i].profile.id)
    }

    /// People whose cards intersect a viewport rectangle, in drawing order.
    pub fn profiles_in_rect(
        &self,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Vec<ProfileId> {
        let Some(layout) = self.layout.as_ref() else {
            return Vec::new();
        };
        self.spatial
            .nodes_in_rect(min_x, min_y, max_x, max_y)
            .into_iter()
            .map(|i| layout.nodes[i].profile.id)
            .collect()
    }

    /// SVG path data for every edge, in edge order.
    pub fn edge_paths(&self) -> Vec<String> {
        self.layout
            .as_ref()
            .map(|l| l.edges.iter().map(|e| e.path_data()).collect())
            .unwrap_or_default()
    }

    /// Card text for every node, in node order.
    pub fn card_labels(&self) -> Vec<CardLabel> {
        let Some(layout) = self.layout.as_ref() else {
            return Vec::new();
        };
        layout
            .nodes
            .iter()
            .map(|n| CardLabel {
                id: n.profile.id,
                name: n.profile.display_name(),
                lifespan: n.profile.lifespan_label(),
            })
            .collect()
    }

    /// Interleaved card positions `[x0, y0, x1, y1, ...]`.
    pub fn positions(&self) -> Vec<f64> {
        self.layout
            .as_ref()
            .map(TreeLayout::positions)
            .unwrap_or_default()
    }

    /// Canvas size of the current layout, `(0, 0)` when empty.
    pub fn canvas_size(&self) -> (f64, f64) {
        self.layout
            .as_ref()
            .map_or((0.0, 0.0), |l| (l.width, l.height))
    }
}

impl Default for TreeView {
    fn default() -> Self {
        Self::new()
    }
}
