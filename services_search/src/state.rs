//! Resumable search state

use crate::scope::SearchScope;
use note_tree::NodeId;
use std::ops::Range;

/// A located occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub node: NodeId,
    /// Byte offset into the node's content
    pub offset: usize,
    /// Byte length (may be zero for empty regex matches)
    pub len: usize,
}

impl Match {
    pub fn new(node: NodeId, offset: usize, len: usize) -> Self {
        Self { node, offset, len }
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// What the engine remembers between calls
///
/// A call continues the previous search only when query and scope are
/// unchanged. Clearing the match keeps query and scope, so an unchanged
/// retry after a miss restarts from the host's selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: Option<String>,
    scope: Option<SearchScope>,
    last_match: Option<Match>,
    /// Offset in `last_match.node` where the next scan starts
    resume_at: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn scope(&self) -> Option<SearchScope> {
        self.scope
    }

    pub fn last_match(&self) -> Option<Match> {
        self.last_match
    }

    pub fn resume_offset(&self) -> Option<usize> {
        self.last_match.map(|_| self.resume_at)
    }

    /// Whether a call with these parameters continues the previous search
    pub fn continues(&self, query: &str, scope: SearchScope) -> bool {
        self.query.as_deref() == Some(query) && self.scope == Some(scope)
    }

    /// Remember the parameters of the current call
    pub(crate) fn set_parameters(&mut self, query: &str, scope: SearchScope) {
        if self.query.as_deref() != Some(query) {
            self.query = Some(query.to_string());
        }
        self.scope = Some(scope);
    }

    /// Record a found match; the next scan starts one past its start, or
    /// past its end when it is non-empty
    pub(crate) fn record_match(&mut self, found: Match) {
        self.resume_at = found.offset + found.len.max(1);
        self.last_match = Some(found);
    }

    /// Record a replacement occupying `inserted`; the next scan starts right
    /// after the inserted text
    pub(crate) fn record_replacement(&mut self, inserted: Match, matched_len: usize) {
        self.resume_at = if inserted.len == 0 && matched_len == 0 {
            inserted.offset + 1
        } else {
            inserted.end()
        };
        self.last_match = Some(inserted);
    }

    /// Forget the match position, keeping query and scope
    pub fn clear_match(&mut self) {
        self.last_match = None;
        self.resume_at = 0;
    }

    /// Forget everything
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continues_requires_same_query_and_scope() {
        let mut state = SearchState::new();
        assert!(!state.continues("a", SearchScope::AllNodes));

        state.set_parameters("a", SearchScope::AllNodes);
        assert!(state.continues("a", SearchScope::AllNodes));
        assert!(!state.continues("A", SearchScope::AllNodes));
        assert!(!state.continues("a", SearchScope::CurrentNode));
    }

    #[test]
    fn test_record_match_resume() {
        let mut state = SearchState::new();
        let node = NodeId::new();

        state.record_match(Match::new(node, 4, 3));
        assert_eq!(state.resume_offset(), Some(7));

        state.record_match(Match::new(node, 4, 0));
        assert_eq!(state.resume_offset(), Some(5));
    }

    #[test]
    fn test_record_replacement_resume() {
        let mut state = SearchState::new();
        let node = NodeId::new();

        state.record_replacement(Match::new(node, 2, 5), 1);
        assert_eq!(state.resume_offset(), Some(7));

        state.record_replacement(Match::new(node, 2, 0), 3);
        assert_eq!(state.resume_offset(), Some(2));

        state.record_replacement(Match::new(node, 2, 0), 0);
        assert_eq!(state.resume_offset(), Some(3));
    }

    #[test]
    fn test_clear_match_keeps_parameters() {
        let mut state = SearchState::new();
        state.set_parameters("q", SearchScope::AllNodes);
        state.record_match(Match::new(NodeId::new(), 0, 1));

        state.clear_match();
        assert!(state.last_match().is_none());
        assert_eq!(state.resume_offset(), None);
        assert!(state.continues("q", SearchScope::AllNodes));

        state.reset();
        assert_eq!(state, SearchState::new());
    }

    #[test]
    fn test_match_range() {
        let m = Match::new(NodeId::new(), 3, 4);
        assert_eq!(m.range(), 3..7);
        assert_eq!(m.end(), 7);
    }
}
