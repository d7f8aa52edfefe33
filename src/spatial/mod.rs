//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree over the laid-out person cards so a click
//! can be mapped back to the person it landed on, and off-screen cards can
//! be culled.

mod rtree;

pub use rtree::{CardBox, SpatialIndex};
