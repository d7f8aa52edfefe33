//! Family tree layout algorithms.
//!
//! This module turns an ancestor or descendant tree, plus the subject's
//! siblings and spouses, into absolute card positions and connector curves.
//! A renderer can draw the result without making any layout decisions of
//! its own.

mod ancestors;
mod config;
mod descendants;
mod engine;
mod types;

pub use config::FamilyLayoutConfig;
pub use engine::FamilyTreeLayout;
pub use types::{LayoutEdge, LayoutNode, NodeType, TreeLayout};
