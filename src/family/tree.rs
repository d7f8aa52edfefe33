//! Recursive ancestor and descendant trees.
//!
//! These mirror the payloads of the `/ancestors` and `/descendants`
//! endpoints. Both are owned trees, so a well-formed value is always finite
//! and acyclic; the same person may still appear twice (pedigree collapse)
//! and is then laid out twice.

use serde::{Deserialize, Serialize};

use super::profile::Profile;

/// Deepest generation the tree page lets the user request.
pub const MAX_GENERATIONS: u32 = 8;

/// A person and, when known, the ancestor trees of both parents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AncestorNode {
    pub profile: Profile,
    #[serde(default)]
    pub father: Option<Box<AncestorNode>>,
    #[serde(default)]
    pub mother: Option<Box<AncestorNode>>,
}

impl AncestorNode {
    /// A person with no known parents.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            father: None,
            mother: None,
        }
    }

    pub fn with_father(mut self, father: AncestorNode) -> Self {
        self.father = Some(Box::new(father));
        self
    }

    pub fn with_mother(mut self, mother: AncestorNode) -> Self {
        self.mother = Some(Box::new(mother));
        self
    }

    /// Known parents, father first.
    pub fn parents(&self) -> impl Iterator<Item = &AncestorNode> {
        self.father.as_deref().into_iter().chain(self.mother.as_deref())
    }

    /// Number of people in the tree, this node included.
    pub fn count(&self) -> usize {
        count_ancestors(Some(self))
    }

    /// Length of the longest father/mother chain (0 for a lone node).
    pub fn max_depth(&self) -> u32 {
        fn walk(node: Option<&AncestorNode>, depth: i64) -> i64 {
            match node {
                None => depth - 1,
                Some(n) => walk(n.father.as_deref(), depth + 1)
                    .max(walk(n.mother.as_deref(), depth + 1)),
            }
        }
        walk(Some(self), 0).max(0) as u32
    }

    /// Copy of the tree keeping at most `generations` generations above this
    /// node. Returns the number of people dropped alongside.
    pub fn truncated(&self, generations: u32) -> (AncestorNode, usize) {
        let mut dropped = 0;
        let tree = self.truncate_at(generations, &mut dropped);
        (tree, dropped)
    }

    fn truncate_at(&self, remaining: u32, dropped: &mut usize) -> AncestorNode {
        let mut keep = |parent: &Option<Box<AncestorNode>>| -> Option<Box<AncestorNode>> {
            let parent = parent.as_deref()?;
            if remaining == 0 {
                *dropped += parent.count();
                None
            } else {
                Some(Box::new(parent.truncate_at(remaining - 1, dropped)))
            }
        };
        let father = keep(&self.father);
        let mother = keep(&self.mother);
        AncestorNode {
            profile: self.profile.clone(),
            father,
            mother,
        }
    }
}

/// A person and the descendant trees of each child, in birth order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescendantNode {
    pub profile: Profile,
    #[serde(default)]
    pub children: Vec<DescendantNode>,
}

impl DescendantNode {
    /// A person with no recorded children.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: DescendantNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of people in the tree, this node included.
    pub fn count(&self) -> usize {
        count_descendants(self)
    }

    /// Deepest generation below this node (0 for a leaf).
    pub fn max_depth(&self) -> u32 {
        self.children
            .iter()
            .map(|c| c.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Copy of the tree keeping at most `generations` generations below this
    /// node. Returns the number of people dropped alongside.
    pub fn truncated(&self, generations: u32) -> (DescendantNode, usize) {
        let mut dropped = 0;
        let tree = self.truncate_at(generations, &mut dropped);
        (tree, dropped)
    }

    fn truncate_at(&self, remaining: u32, dropped: &mut usize) -> DescendantNode {
        let children = if remaining == 0 {
            *dropped += self.children.iter().map(DescendantNode::count).sum::<usize>();
            Vec::new()
        } else {
            self.children
                .iter()
                .map(|c| c.truncate_at(remaining - 1, dropped))
                .collect()
        };
        DescendantNode {
            profile: self.profile.clone(),
            children,
        }
    }
}

/// People in an ancestor tree including its root; 0 for an absent tree.
pub fn count_ancestors(node: Option<&AncestorNode>) -> usize {
    match node {
        None => 0,
        Some(n) => 1 + n.parents().map(|p| count_ancestors(Some(p))).sum::<usize>(),
    }
}

/// People in a descendant tree including its root.
pub fn count_descendants(node: &DescendantNode) -> usize {
    1 + node.children.iter().map(count_descendants).sum::<usize>()
}

/// Ancestor badge count: everyone except the subject.
pub fn ancestor_badge(node: Option<&AncestorNode>) -> usize {
    count_ancestors(node).saturating_sub(1)
}

/// Descendant badge count: everyone except the subject.
pub fn descendant_badge(node: Option<&DescendantNode>) -> usize {
    node.map_or(0, |n| count_descendants(n) - 1)
}
