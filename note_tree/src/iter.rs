//! Pre-order traversal

use crate::node::{NodeId, NodeRef};
use crate::tree::DocumentTree;

/// Depth-first, children-in-order traversal
///
/// Lazy and finite. Each call to `DocumentTree::pre_order` starts over, so a
/// traversal is restarted by asking the tree for a new one.
pub struct PreOrder<'a> {
    tree: &'a DocumentTree,
    /// Pending nodes with their depth, next node on top
    stack: Vec<(NodeId, usize)>,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(tree: &'a DocumentTree, starts: &[NodeId], depth: usize) -> Self {
        let stack = starts.iter().rev().map(|id| (*id, depth)).collect();
        Self { tree, stack }
    }

    pub(crate) fn empty(tree: &'a DocumentTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let data = self.tree.data(id)?;
        self.stack
            .extend(data.children.iter().rev().map(|child| (*child, depth + 1)));
        Some(NodeRef::new(id, data, depth))
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::DocumentTree;

    #[test]
    fn test_pre_order_children_in_order() {
        let mut tree = DocumentTree::empty();
        let a = tree.append_root("a", "");
        let b = tree.append_child(a, "b", "").unwrap();
        tree.append_child(b, "c", "").unwrap();
        tree.append_child(a, "d", "").unwrap();
        tree.append_root("e", "");

        let titles: Vec<(&str, usize)> = tree
            .pre_order()
            .map(|node| (node.title(), node.depth()))
            .collect();
        assert_eq!(
            titles,
            vec![("a", 0), ("b", 1), ("c", 2), ("d", 1), ("e", 0)]
        );
    }

    #[test]
    fn test_pre_order_restartable() {
        let mut tree = DocumentTree::empty();
        let a = tree.append_root("a", "");
        tree.append_child(a, "b", "").unwrap();

        let mut first = tree.pre_order();
        assert_eq!(first.next().map(|n| n.title()), Some("a"));

        let again: Vec<&str> = tree.pre_order().map(|n| n.title()).collect();
        assert_eq!(again, vec!["a", "b"]);
    }

    #[test]
    fn test_pre_order_from_keeps_absolute_depth() {
        let mut tree = DocumentTree::empty();
        let a = tree.append_root("a", "");
        let b = tree.append_child(a, "b", "").unwrap();
        tree.append_child(b, "c", "").unwrap();
        tree.append_child(a, "sibling", "").unwrap();

        let from_b: Vec<(&str, usize)> = tree
            .pre_order_from(b)
            .unwrap()
            .map(|node| (node.title(), node.depth()))
            .collect();
        assert_eq!(from_b, vec![("b", 1), ("c", 2)]);
    }

    #[test]
    fn test_pre_order_empty_tree() {
        let tree = DocumentTree::empty();
        assert_eq!(tree.pre_order().count(), 0);
    }
}
