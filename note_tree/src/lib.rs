//! # Note Tree
//!
//! The in-memory document model of a hierarchical note editor.
//!
//! ## Philosophy
//!
//! - **Handles, not pointers**: Nodes live in an arena and are addressed by `NodeId`
//! - **Parents are lookups**: A parent link is a handle used for ancestry queries, never ownership
//! - **Depth is derived**: Depth is recomputed from the parent chain, never cached
//! - **Order is load-bearing**: Pre-order traversal is both the save order and the search order
//!
//! ## Design
//!
//! - `DocumentTree`: Owns every node reachable from its ordered root sequence
//! - `Subtree`: A detached deep copy with no identity, used for copy/paste
//! - `PreOrder`: Lazy, restartable depth-first enumeration yielding `NodeRef`s

pub mod iter;
pub mod node;
pub mod subtree;
pub mod tree;

pub use iter::PreOrder;
pub use node::{NodeId, NodeRef};
pub use subtree::Subtree;
pub use tree::{DocumentTree, RootTemplate, TreeError, TreeResult};
