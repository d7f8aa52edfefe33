//! Genealogy input data: profiles and the recursive trees fetched from the
//! family service.
//!
//! The layout engine never mutates these values; they are decoded fresh from
//! the service payloads for every layout.

mod profile;
mod tree;

pub use profile::{Gender, Profile, ProfileId};
pub use tree::{
    AncestorNode, DescendantNode, MAX_GENERATIONS, ancestor_badge, count_ancestors,
    count_descendants, descendant_badge,
};
