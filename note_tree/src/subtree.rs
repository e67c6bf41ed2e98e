//! Detached subtree snapshots

use serde::{Deserialize, Serialize};

/// A deep copy of a node and its descendants, detached from any tree
///
/// A subtree carries no node identities and no parent link. Inserting it into
/// a tree allocates fresh `NodeId`s, so the same snapshot can be pasted any
/// number of times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtree {
    pub title: String,
    pub content: String,
    pub children: Vec<Subtree>,
}

impl Subtree {
    /// Creates a leaf subtree
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// Adds a child (builder style)
    pub fn with_child(mut self, child: Subtree) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of nodes, this one included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Subtree::node_count).sum::<usize>()
    }
}
