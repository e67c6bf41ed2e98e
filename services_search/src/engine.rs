//! Find / replace engine

use crate::matcher::Matcher;
use crate::scope::{scope_nodes, SearchOptions, SearchScope, Selection};
use crate::state::{Match, SearchState};
use log::debug;
use note_tree::{DocumentTree, NodeId, TreeError};
use thiserror::Error;

/// Search error
///
/// Not finding anything is never an error.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}

/// Search result
pub type SearchResult<T> = Result<T, SearchError>;

/// Stateful find/replace service for one document session
#[derive(Debug, Default)]
pub struct SearchEngine {
    state: SearchState,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Forget query, scope and position (e.g. after opening another document)
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Find the next occurrence of `query` within `scope`
    ///
    /// With the same query and scope as the previous call, the scan resumes
    /// just after the previous match. Otherwise it starts at the selection.
    /// The scan wraps to the start of the scope once and stops at the
    /// position it started from.
    pub fn find_next(
        &mut self,
        tree: &DocumentTree,
        query: &str,
        scope: SearchScope,
        options: SearchOptions,
        selection: Selection,
    ) -> SearchResult<Option<Match>> {
        if query.is_empty() {
            return Ok(None);
        }
        let matcher = Matcher::new(query, options)?;
        Ok(self.locate(tree, &matcher, query, scope, selection))
    }

    /// Find the next occurrence and replace it
    ///
    /// Whole-word and regex searches expand `$n` group references in
    /// `replacement`; plain searches insert it literally. The next find
    /// continues after the inserted text.
    pub fn replace_next(
        &mut self,
        tree: &mut DocumentTree,
        query: &str,
        replacement: &str,
        scope: SearchScope,
        options: SearchOptions,
        selection: Selection,
    ) -> SearchResult<bool> {
        if query.is_empty() {
            return Ok(false);
        }
        let matcher = Matcher::new(query, options)?;
        let found = match self.locate(tree, &matcher, query, scope, selection) {
            Some(found) => found,
            None => return Ok(false),
        };

        let content = tree.content(found.node)?;
        let range = found.range();
        let inserted = matcher.replacement_for(content, range.clone(), replacement);
        let mut updated = String::with_capacity(content.len() + inserted.len());
        updated.push_str(&content[..range.start]);
        updated.push_str(&inserted);
        updated.push_str(&content[range.end..]);

        tree.set_content(found.node, updated)?;
        self.state.record_replacement(
            Match::new(found.node, found.offset, inserted.len()),
            found.len,
        );
        debug!(
            "replaced {} bytes at {} in {}",
            found.len, found.offset, found.node
        );
        Ok(true)
    }

    /// Replace every occurrence in `scope`, returning how many were replaced
    ///
    /// Each node is rewritten in a single pass; there is no wraparound and
    /// no continuation. The match position is cleared afterwards.
    pub fn replace_all(
        &mut self,
        tree: &mut DocumentTree,
        query: &str,
        replacement: &str,
        scope: SearchScope,
        options: SearchOptions,
        selection: Selection,
    ) -> SearchResult<usize> {
        if query.is_empty() {
            return Ok(0);
        }
        let matcher = Matcher::new(query, options)?;

        let mut total = 0;
        for node in scope_nodes(tree, scope, selection.node) {
            if let Some((updated, count)) = matcher.replace_all(tree.content(node)?, replacement) {
                tree.set_content(node, updated)?;
                total += count;
            }
        }

        self.state.clear_match();
        debug!("replace all {:?} in {}: {} occurrence(s)", query, scope, total);
        Ok(total)
    }

    fn locate(
        &mut self,
        tree: &DocumentTree,
        matcher: &Matcher<'_>,
        query: &str,
        scope: SearchScope,
        selection: Selection,
    ) -> Option<Match> {
        let continuing = self.state.continues(query, scope);
        if !continuing {
            debug!("new search for {:?} in {}", query, scope);
        }
        self.state.set_parameters(query, scope);

        let nodes = scope_nodes(tree, scope, selection.node);
        let (start_index, start_offset) = self.start_position(&nodes, continuing, selection);

        match scan(tree, &nodes, matcher, start_index, start_offset) {
            Some(found) => {
                self.state.record_match(found);
                Some(found)
            }
            None => {
                self.state.clear_match();
                None
            }
        }
    }

    /// Node index and offset where the forward scan begins
    fn start_position(&self, nodes: &[NodeId], continuing: bool, selection: Selection) -> (usize, usize) {
        if continuing {
            if let (Some(last), Some(resume)) = (self.state.last_match(), self.state.resume_offset()) {
                if let Some(index) = nodes.iter().position(|id| *id == last.node) {
                    return (index, resume);
                }
                debug!("{} left the search scope, restarting from selection", last.node);
            }
        }

        match selection
            .node
            .and_then(|node| nodes.iter().position(|id| *id == node))
        {
            Some(index) => (index, selection.offset),
            None => (0, 0),
        }
    }
}

/// Forward scan from the start position, then one wrapped pass up to it
fn scan(
    tree: &DocumentTree,
    nodes: &[NodeId],
    matcher: &Matcher<'_>,
    start_index: usize,
    start_offset: usize,
) -> Option<Match> {
    let content = move |node: NodeId| tree.content(node).unwrap_or_default();

    for (index, node) in nodes.iter().enumerate().skip(start_index) {
        let from = if index == start_index { start_offset } else { 0 };
        if let Some(range) = matcher.find_at(content(*node), from) {
            return Some(Match::new(*node, range.start, range.len()));
        }
    }

    if start_index == 0 && start_offset == 0 {
        return None;
    }
    debug!("search wrapped to start of scope");

    for (index, node) in nodes.iter().enumerate().take(start_index + 1) {
        if let Some(range) = matcher.find_at(content(*node), 0) {
            if index < start_index || range.start < start_offset {
                return Some(Match::new(*node, range.start, range.len()));
            }
        }
    }

    None
}
