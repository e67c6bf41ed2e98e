//! # Search Service
//!
//! Find and replace across a document tree.
//!
//! ## Philosophy
//!
//! - **Resumable**: "Find next" continues from the previous match while query and scope are unchanged
//! - **Explicit state**: Resume position lives in a plain `SearchState`, not in a suspended generator
//! - **Absence is not an error**: No match is `None`/`false`/`0`; only a bad pattern fails
//! - **Cheap by default**: Case-sensitive literal search never compiles a pattern
//!
//! ## Design
//!
//! - `SearchScope` picks the node sequence (selected node, whole tree, or selected subtree)
//! - `Matcher` is either a borrowed literal or a compiled regex
//! - `SearchEngine` owns the `SearchState` and runs find/replace over a `DocumentTree`
//!
//! Offsets are byte offsets into node content.

pub mod engine;
pub mod matcher;
pub mod scope;
pub mod state;

pub use engine::{SearchEngine, SearchError, SearchResult};
pub use matcher::Matcher;
pub use scope::{scope_nodes, SearchOptions, SearchScope, Selection};
pub use state::{Match, SearchState};
