//! Search scopes, flags and the host's selection

use note_tree::{DocumentTree, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which nodes a search or replace considers, in pre-order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Only the selected node (nothing if no selection)
    #[default]
    CurrentNode,
    /// Every node in the document
    AllNodes,
    /// The selected node and its descendants (whole document if no selection)
    CurrentNodeAndSubtree,
}

impl SearchScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchScope::CurrentNode => "current_node",
            SearchScope::AllNodes => "all_nodes",
            SearchScope::CurrentNodeAndSubtree => "current_node_and_subtree",
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "current_node" | "node" => Ok(SearchScope::CurrentNode),
            "all_nodes" | "all" => Ok(SearchScope::AllNodes),
            "current_node_and_subtree" | "subtree" => Ok(SearchScope::CurrentNodeAndSubtree),
            other => Err(format!("Unknown search scope: {}", other)),
        }
    }
}

/// Matching flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    pub match_case: bool,
    /// Wrap the query in word boundaries (implies pattern matching)
    pub whole_word: bool,
    /// Treat the query as a regular expression
    pub use_regex: bool,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn match_case(mut self, value: bool) -> Self {
        self.match_case = value;
        self
    }

    pub fn whole_word(mut self, value: bool) -> Self {
        self.whole_word = value;
        self
    }

    pub fn use_regex(mut self, value: bool) -> Self {
        self.use_regex = value;
        self
    }

    /// Whether matching goes through a compiled pattern with `$n` replacement expansion
    pub fn is_pattern(&self) -> bool {
        self.use_regex || self.whole_word
    }
}

/// Selection state supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub node: Option<NodeId>,
    /// Cursor position in the selected node's content
    pub offset: usize,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn at(node: NodeId, offset: usize) -> Self {
        Self {
            node: Some(node),
            offset,
        }
    }
}

/// Enumerate the nodes of `scope` in traversal order
///
/// A selected node that is no longer in the tree counts as no selection.
pub fn scope_nodes(tree: &DocumentTree, scope: SearchScope, selected: Option<NodeId>) -> Vec<NodeId> {
    let selected = selected.filter(|id| tree.contains(*id));
    match (scope, selected) {
        (SearchScope::CurrentNode, Some(node)) => vec![node],
        (SearchScope::CurrentNode, None) => Vec::new(),
        (SearchScope::CurrentNodeAndSubtree, Some(node)) => tree
            .pre_order_from_or_empty(node)
            .map(|n| n.id())
            .collect(),
        (SearchScope::AllNodes, _) | (SearchScope::CurrentNodeAndSubtree, None) => {
            tree.pre_order().map(|n| n.id()).collect()
        }
    }
}
