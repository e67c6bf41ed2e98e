//! Node identity and read-only node views

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a node in a document tree
///
/// Two nodes with identical title and content are still distinct nodes.
/// Identifiers are never reused, so a handle to a deleted node stays invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Creates a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a node ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

/// Arena slot for a single node
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl NodeData {
    pub(crate) fn new(title: String, content: String, parent: Option<NodeId>) -> Self {
        Self {
            title,
            content,
            parent,
            children: Vec::new(),
        }
    }
}

/// Borrowed view of a node, carrying the depth computed while reaching it
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    id: NodeId,
    data: &'a NodeData,
    depth: usize,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(id: NodeId, data: &'a NodeData, depth: usize) -> Self {
        Self { id, data, depth }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn title(&self) -> &'a str {
        &self.data.title
    }

    pub fn content(&self) -> &'a str {
        &self.data.content
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.data.parent
    }

    pub fn children(&self) -> &'a [NodeId] {
        &self.data.children
    }

    /// Number of ancestors (0 for roots)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn has_children(&self) -> bool {
        !self.data.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_unique() {
        let a = NodeId::new();
        let b = NodeId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_node_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = NodeId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
        assert!(id.to_string().starts_with("node:"));
    }

    #[test]
    fn test_node_id_serde() {
        let id = NodeId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
