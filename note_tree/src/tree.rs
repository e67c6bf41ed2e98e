//! Document tree: ownership, structural edits and traversal

use crate::iter::PreOrder;
use crate::node::{NodeData, NodeId, NodeRef};
use crate::subtree::Subtree;
use std::collections::HashMap;
use thiserror::Error;

/// Title given to the root of a fresh document
pub const DEFAULT_ROOT_TITLE: &str = "My Document";

/// Content given to the root of a fresh document
pub const DEFAULT_ROOT_CONTENT: &str = "This is the root node.";

/// Tree error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Invalid target: {0} is not part of this document")]
    InvalidTarget(NodeId),
}

/// Tree result
pub type TreeResult<T> = Result<T, TreeError>;

/// Title and content of the single root a fresh document starts with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootTemplate {
    pub title: String,
    pub content: String,
}

impl RootTemplate {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl Default for RootTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_TITLE, DEFAULT_ROOT_CONTENT)
    }
}

/// An ordered sequence of root nodes and everything reachable from them
///
/// Every non-root node has exactly one parent and appears exactly once in
/// that parent's children. The tree owns all nodes exclusively; removing a
/// node drops its whole subtree from the arena.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: HashMap<NodeId, NodeData>,
    roots: Vec<NodeId>,
    template: RootTemplate,
    modified: bool,
}

impl DocumentTree {
    /// Create a fresh document holding the default root
    pub fn new() -> Self {
        Self::with_template(RootTemplate::default())
    }

    /// Create a fresh document holding a root built from `template`
    pub fn with_template(template: RootTemplate) -> Self {
        let mut tree = Self::empty();
        tree.template = template;
        tree.reset();
        tree
    }

    /// Create a tree with no nodes at all (decode target)
    pub fn empty() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            template: RootTemplate::default(),
            modified: false,
        }
    }

    pub fn template(&self) -> &RootTemplate {
        &self.template
    }

    pub fn set_template(&mut self, template: RootTemplate) {
        self.template = template;
    }

    /// Discard every node and start over with a single fresh root
    pub fn reset(&mut self) -> NodeId {
        self.nodes.clear();
        self.roots.clear();
        let title = self.template.title.clone();
        let content = self.template.content.clone();
        let root = self.append_root(title, content);
        self.modified = false;
        root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn first_root(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Look up a node, computing its depth
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        let data = self.nodes.get(&id)?;
        let depth = self.depth(id).ok()?;
        Some(NodeRef::new(id, data, depth))
    }

    pub(crate) fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(&id)
    }

    fn require(&self, id: NodeId) -> TreeResult<&NodeData> {
        self.nodes.get(&id).ok_or(TreeError::InvalidTarget(id))
    }

    fn require_mut(&mut self, id: NodeId) -> TreeResult<&mut NodeData> {
        self.nodes.get_mut(&id).ok_or(TreeError::InvalidTarget(id))
    }

    pub fn title(&self, id: NodeId) -> TreeResult<&str> {
        Ok(&self.require(id)?.title)
    }

    pub fn content(&self, id: NodeId) -> TreeResult<&str> {
        Ok(&self.require(id)?.content)
    }

    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.require(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        Ok(&self.require(id)?.children)
    }

    /// Number of ancestors, walked fresh from the parent chain
    pub fn depth(&self, id: NodeId) -> TreeResult<usize> {
        let mut depth = 0;
        let mut current = self.require(id)?.parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes.get(&parent).and_then(|data| data.parent);
        }
        Ok(depth)
    }

    /// Rename a node
    pub fn set_title(&mut self, id: NodeId, title: impl Into<String>) -> TreeResult<()> {
        self.require_mut(id)?.title = title.into();
        self.modified = true;
        Ok(())
    }

    /// Replace a node's text
    pub fn set_content(&mut self, id: NodeId, content: impl Into<String>) -> TreeResult<()> {
        self.require_mut(id)?.content = content.into();
        self.modified = true;
        Ok(())
    }

    /// Append a new node to the end of the root sequence
    pub fn append_root(&mut self, title: impl Into<String>, content: impl Into<String>) -> NodeId {
        let id = NodeId::new();
        self.nodes
            .insert(id, NodeData::new(title.into(), content.into(), None));
        self.roots.push(id);
        self.modified = true;
        id
    }

    /// Append a new node as the last child of `parent`
    pub fn append_child(
        &mut self,
        parent: NodeId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> TreeResult<NodeId> {
        let id = NodeId::new();
        self.require_mut(parent)?.children.push(id);
        self.nodes
            .insert(id, NodeData::new(title.into(), content.into(), Some(parent)));
        self.modified = true;
        Ok(id)
    }

    /// Add an empty node as the last child of `parent`
    ///
    /// Without a parent the node goes under the first root; an empty tree is
    /// reset to a fresh document first.
    pub fn add_child(&mut self, parent: Option<NodeId>, title: impl Into<String>) -> TreeResult<NodeId> {
        let parent = match parent {
            Some(parent) => parent,
            None => match self.first_root() {
                Some(root) => root,
                None => self.reset(),
            },
        };
        self.append_child(parent, title, String::new())
    }

    /// Insert an empty node immediately after `node` among its siblings
    ///
    /// Without a node this behaves as `add_child(None, ..)`.
    pub fn add_sibling(&mut self, node: Option<NodeId>, title: impl Into<String>) -> TreeResult<NodeId> {
        let node = match node {
            Some(node) => node,
            None => return self.add_child(None, title),
        };
        let parent = self.require(node)?.parent;
        let id = NodeId::new();
        let siblings = match parent {
            Some(parent) => &mut self.require_mut(parent)?.children,
            None => &mut self.roots,
        };
        let index = siblings
            .iter()
            .position(|sibling| *sibling == node)
            .map(|index| index + 1)
            .unwrap_or(siblings.len());
        siblings.insert(index, id);
        self.nodes
            .insert(id, NodeData::new(title.into(), String::new(), parent));
        self.modified = true;
        Ok(id)
    }

    /// Detach `node` and drop its entire subtree
    ///
    /// Returns the number of nodes removed.
    pub fn remove(&mut self, node: NodeId) -> TreeResult<usize> {
        let parent = self.require(node)?.parent;
        match parent {
            Some(parent) => {
                if let Some(data) = self.nodes.get_mut(&parent) {
                    data.children.retain(|child| *child != node);
                }
            }
            None => self.roots.retain(|root| *root != node),
        }

        let mut removed = 0;
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(data) = self.nodes.remove(&id) {
                pending.extend(data.children);
                removed += 1;
            }
        }
        self.modified = true;
        Ok(removed)
    }

    /// Deep-copy `node` and its descendants into a detached subtree
    pub fn clone_subtree(&self, node: NodeId) -> TreeResult<Subtree> {
        let data = self.require(node)?;
        let children = data
            .children
            .iter()
            .map(|child| self.clone_subtree(*child))
            .collect::<TreeResult<Vec<_>>>()?;
        Ok(Subtree {
            title: data.title.clone(),
            content: data.content.clone(),
            children,
        })
    }

    /// Append `subtree` as the last child of `target`, or as a new root
    ///
    /// Every inserted node gets a fresh identity. Returns the id of the
    /// subtree's top node.
    pub fn insert_subtree(&mut self, target: Option<NodeId>, subtree: Subtree) -> TreeResult<NodeId> {
        let Subtree {
            title,
            content,
            children,
        } = subtree;
        let id = match target {
            Some(target) => self.append_child(target, title, content)?,
            None => self.append_root(title, content),
        };
        for child in children {
            self.insert_subtree(Some(id), child)?;
        }
        Ok(id)
    }

    /// Pre-order traversal over the whole document
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder::new(self, &self.roots, 0)
    }

    /// Pre-order traversal over `node` and its descendants
    pub fn pre_order_from(&self, node: NodeId) -> TreeResult<PreOrder<'_>> {
        let depth = self.depth(node)?;
        Ok(PreOrder::new(self, &[node], depth))
    }

    /// Pre-order traversal that yields nothing if `node` is absent
    pub fn pre_order_from_or_empty(&self, node: NodeId) -> PreOrder<'_> {
        self.pre_order_from(node)
            .unwrap_or_else(|_| PreOrder::empty(self))
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new()
    }
}
