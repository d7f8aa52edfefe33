//! Geometry and animation constants for family tree diagrams.
//!
//! Every position in a layout is derived from a (possibly fractional) column
//! index and an integer generation row:
//!
//! ```text
//! x = column * (node_width + horizontal_gap) + padding
//! y = row    * (node_height + vertical_gap)  + padding
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for the family tree layout.
///
/// Decodes from a partial camelCase object; omitted fields keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyLayoutConfig {
    /// Width of a person card in pixels.
    pub node_width: f64,
    /// Height of a person card in pixels.
    pub node_height: f64,
    /// Horizontal gap between neighbouring columns.
    pub horizontal_gap: f64,
    /// Vertical gap between generation rows.
    pub vertical_gap: f64,
    /// Canvas padding on all four sides.
    pub padding: f64,
    /// Animation delay added per generation (ms).
    pub generation_delay: u32,
    /// Extra delay of an edge after its origin node (ms).
    pub edge_delay: u32,
    /// Delay of sibling and spouse cards (ms).
    pub side_node_delay: u32,
    /// Delay of the dashed sibling-to-parent edges (ms).
    pub sibling_edge_delay: u32,
}

impl Default for FamilyLayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 168.0,
            node_height: 70.0,
            horizontal_gap: 24.0,
            vertical_gap: 60.0,
            padding: 40.0,
            generation_delay: 150,
            edge_delay: 100,
            side_node_delay: 80,
            sibling_edge_delay: 200,
        }
    }
}

impl FamilyLayoutConfig {
    /// Distance between the left edges of two adjacent columns.
    #[inline]
    pub fn column_pitch(&self) -> f64 {
        self.node_width + self.horizontal_gap
    }

    /// Distance between the top edges of two adjacent rows.
    #[inline]
    pub fn row_pitch(&self) -> f64 {
        self.node_height + self.vertical_gap
    }

    /// Left edge of a card placed at `column`.
    #[inline]
    pub fn column_x(&self, column: f64) -> f64 {
        column * self.column_pitch() + self.padding
    }

    /// Top edge of a card placed at `row`.
    #[inline]
    pub fn row_y(&self, row: u32) -> f64 {
        f64::from(row) * self.row_pitch() + self.padding
    }

    /// Canvas width for `columns` columns, no trailing gap.
    pub fn canvas_width(&self, columns: usize) -> f64 {
        columns as f64 * self.column_pitch() - self.horizontal_gap + 2.0 * self.padding
    }

    /// Canvas height for `rows` rows, no trailing gap.
    pub fn canvas_height(&self, rows: u32) -> f64 {
        f64::from(rows) * self.row_pitch() - self.vertical_gap + 2.0 * self.padding
    }

    /// Animation delay of a card `depth` generations from the subject.
    ///
    /// Saturates at `u32::MAX`; the delays come from caller-supplied config.
    #[inline]
    pub fn node_delay(&self, depth: u32) -> u32 {
        depth.saturating_mul(self.generation_delay)
    }

    /// Animation delay of an edge leaving a card at `depth`.
    #[inline]
    pub fn edge_delay_from(&self, depth: u32) -> u32 {
        self.node_delay(depth).saturating_add(self.edge_delay)
    }
}
