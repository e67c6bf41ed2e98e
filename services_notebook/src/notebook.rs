//! Notebook session: one open document plus selection, clipboard and search

use crate::config::NotebookSettings;
use crate::io::{FsNotebookIo, NotebookIo};
use log::{debug, info};
use note_tree::{DocumentTree, NodeId, Subtree, TreeError};
use outline_codec::CodecError;
use services_search::{
    Match, SearchEngine, SearchError, SearchOptions, SearchScope, SearchState, Selection,
};
use services_settings::SettingsError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Notebook error
#[derive(Debug, Error)]
pub enum NotebookError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Nothing to paste")]
    NothingToPaste,

    #[error("Document has no file path")]
    NoFilePath,
}

/// Notebook result
pub type NotebookResult<T> = Result<T, NotebookError>;

/// An editing session over one document
///
/// The session owns the tree and everything the host would otherwise keep
/// beside it: the file path, the selected node and cursor, the in-process
/// clipboard and the search state.
pub struct Notebook<I: NotebookIo = FsNotebookIo> {
    io: I,
    settings: NotebookSettings,
    tree: DocumentTree,
    path: Option<PathBuf>,
    selected: Option<NodeId>,
    cursor: usize,
    clipboard: Option<Subtree>,
    search: SearchEngine,
}

impl Notebook<FsNotebookIo> {
    /// Create a session on the local filesystem with default settings
    pub fn new() -> Self {
        Self::with_io(FsNotebookIo, NotebookSettings::default())
    }
}

impl Default for Notebook<FsNotebookIo> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: NotebookIo> Notebook<I> {
    /// Create a session holding a fresh document
    pub fn with_io(io: I, settings: NotebookSettings) -> Self {
        let mut notebook = Self {
            io,
            tree: DocumentTree::with_template(settings.template.clone()),
            settings,
            path: None,
            selected: None,
            cursor: 0,
            clipboard: None,
            search: SearchEngine::new(),
        };
        notebook.selected = notebook.tree.first_root();
        notebook
    }

    pub fn settings(&self) -> &NotebookSettings {
        &self.settings
    }

    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Selected node and cursor as seen by the search engine
    pub fn selection(&self) -> Selection {
        Selection {
            node: self.selected,
            offset: self.cursor,
        }
    }

    pub fn search_state(&self) -> &SearchState {
        self.search.state()
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    pub fn is_modified(&self) -> bool {
        self.tree.is_modified()
    }

    /// Whether discarding the document (new, open, close) loses edits
    pub fn needs_save_prompt(&self) -> bool {
        self.tree.is_modified()
    }

    /// Window title: `MyTreePad - <file name>`, starred when modified
    pub fn display_title(&self) -> String {
        let name = self
            .path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "New Document".to_string());
        let marker = if self.tree.is_modified() { " *" } else { "" };
        format!("MyTreePad - {}{}", name, marker)
    }

    /// Discard the document and start over with the template root
    pub fn new_document(&mut self) {
        self.tree = DocumentTree::with_template(self.settings.template.clone());
        self.path = None;
        self.search.reset();
        self.selected = self.tree.first_root();
        self.cursor = 0;
        debug!("new document");
    }

    /// Load `path`, replacing the current document only if decoding succeeds
    pub fn open(&mut self, path: impl AsRef<Path>) -> NotebookResult<()> {
        let path = path.as_ref();
        let bytes = self.io.read(path).map_err(CodecError::from)?;
        let mut tree = outline_codec::decode(&bytes, &self.settings.codec)?;
        tree.set_template(self.settings.template.clone());

        info!("opened {} ({} nodes)", path.display(), tree.len());
        self.tree = tree;
        self.path = Some(path.to_path_buf());
        self.search.reset();
        self.selected = self.tree.first_root();
        self.cursor = 0;
        Ok(())
    }

    /// Save to the current path
    pub fn save(&mut self) -> NotebookResult<()> {
        let path = self.path.clone().ok_or(NotebookError::NoFilePath)?;
        self.write_to(&path)
    }

    /// Save to `path` and make it the current path
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> NotebookResult<()> {
        let path = path.as_ref();
        self.write_to(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> NotebookResult<()> {
        let bytes = outline_codec::encode(&self.tree, &self.settings.codec)?;
        self.io.write(path, &bytes).map_err(CodecError::from)?;
        self.tree.set_modified(false);
        info!("saved {} ({} nodes)", path.display(), self.tree.len());
        Ok(())
    }

    /// Change the selected node; the cursor returns to the start
    pub fn select(&mut self, node: Option<NodeId>) -> NotebookResult<()> {
        if let Some(node) = node {
            if !self.tree.contains(node) {
                return Err(TreeError::InvalidTarget(node).into());
            }
        }
        self.selected = node;
        self.cursor = 0;
        Ok(())
    }

    /// Move the cursor within the selected node's content
    ///
    /// Clamped to the content length.
    pub fn set_cursor(&mut self, offset: usize) {
        let len = self
            .selected
            .and_then(|node| self.tree.content(node).ok())
            .map_or(0, str::len);
        self.cursor = offset.min(len);
    }

    /// First node in traversal order with this exact title
    pub fn find_by_title(&self, title: &str) -> Option<NodeId> {
        self.tree
            .pre_order()
            .find(|node| node.title() == title)
            .map(|node| node.id())
    }

    pub fn set_title(&mut self, node: NodeId, title: impl Into<String>) -> NotebookResult<()> {
        self.tree.set_title(node, title)?;
        Ok(())
    }

    pub fn set_content(&mut self, node: NodeId, content: impl Into<String>) -> NotebookResult<()> {
        self.tree.set_content(node, content)?;
        if self.selected == Some(node) {
            self.set_cursor(self.cursor);
        }
        Ok(())
    }

    /// Add a node under the selection and select it
    pub fn add_child(&mut self) -> NotebookResult<NodeId> {
        let id = self
            .tree
            .add_child(self.selected, self.settings.new_node_title.as_str())?;
        self.select(Some(id))?;
        Ok(id)
    }

    /// Add a node after the selection and select it
    pub fn add_sibling(&mut self) -> NotebookResult<NodeId> {
        let id = self
            .tree
            .add_sibling(self.selected, self.settings.new_node_title.as_str())?;
        self.select(Some(id))?;
        Ok(id)
    }

    /// Delete the selected subtree; returns how many nodes went away
    ///
    /// Without a selection nothing happens. The selection is cleared.
    pub fn delete_selected(&mut self) -> NotebookResult<usize> {
        let node = match self.selected {
            Some(node) => node,
            None => return Ok(0),
        };
        let removed = self.tree.remove(node)?;
        self.selected = None;
        self.cursor = 0;
        debug!("deleted {} node(s)", removed);
        Ok(removed)
    }

    /// Snapshot the selected subtree into the clipboard
    ///
    /// Returns false without a selection, leaving the clipboard unchanged.
    pub fn copy(&mut self) -> NotebookResult<bool> {
        let node = match self.selected {
            Some(node) => node,
            None => return Ok(false),
        };
        self.clipboard = Some(self.tree.clone_subtree(node)?);
        Ok(true)
    }

    /// Insert a copy of the clipboard under the selection (or as a new root)
    /// and select it
    pub fn paste(&mut self) -> NotebookResult<NodeId> {
        let subtree = self.clipboard.clone().ok_or(NotebookError::NothingToPaste)?;
        let id = self.tree.insert_subtree(self.selected, subtree)?;
        self.select(Some(id))?;
        Ok(id)
    }

    /// Find the next match and move selection and cursor to it
    pub fn find_next(
        &mut self,
        query: &str,
        scope: SearchScope,
        options: SearchOptions,
    ) -> NotebookResult<Option<Match>> {
        let selection = self.selection();
        let found = self
            .search
            .find_next(&self.tree, query, scope, options, selection)?;
        if let Some(found) = found {
            self.selected = Some(found.node);
            self.cursor = found.offset;
        }
        Ok(found)
    }

    /// Replace the next match; selection and cursor move to the inserted text
    pub fn replace_next(
        &mut self,
        query: &str,
        replacement: &str,
        scope: SearchScope,
        options: SearchOptions,
    ) -> NotebookResult<bool> {
        let selection = self.selection();
        let replaced = self.search.replace_next(
            &mut self.tree,
            query,
            replacement,
            scope,
            options,
            selection,
        )?;
        if let Some(inserted) = self.search.state().last_match().filter(|_| replaced) {
            self.selected = Some(inserted.node);
            self.cursor = inserted.offset;
        }
        Ok(replaced)
    }

    /// Replace every match in scope; returns the count
    pub fn replace_all(
        &mut self,
        query: &str,
        replacement: &str,
        scope: SearchScope,
        options: SearchOptions,
    ) -> NotebookResult<usize> {
        let selection = self.selection();
        let count = self.search.replace_all(
            &mut self.tree,
            query,
            replacement,
            scope,
            options,
            selection,
        )?;
        self.set_cursor(self.cursor);
        info!("replaced {} occurrence(s) of {:?}", count, query);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryNotebookIo;

    fn notebook() -> Notebook<MemoryNotebookIo> {
        Notebook::with_io(MemoryNotebookIo::new(), NotebookSettings::default())
    }

    #[test]
    fn test_fresh_document() {
        let nb = notebook();
        assert_eq!(nb.tree().len(), 1);
        let root = nb.selected().unwrap();
        assert_eq!(nb.tree().title(root).unwrap(), "My Document");
        assert_eq!(nb.tree().content(root).unwrap(), "This is the root node.");
        assert!(!nb.is_modified());
        assert!(nb.path().is_none());
        assert_eq!(nb.display_title(), "MyTreePad - New Document");
    }

    #[test]
    fn test_custom_template_and_new_node_title() {
        let settings = NotebookSettings {
            template: note_tree::RootTemplate::new("Inbox", ""),
            new_node_title: "Untitled".to_string(),
            ..NotebookSettings::default()
        };
        let mut nb = Notebook::with_io(MemoryNotebookIo::new(), settings);
        assert_eq!(nb.tree().title(nb.selected().unwrap()).unwrap(), "Inbox");

        let child = nb.add_child().unwrap();
        assert_eq!(nb.tree().title(child).unwrap(), "Untitled");
        assert_eq!(nb.tree().content(child).unwrap(), "");
    }

    #[test]
    fn test_add_nodes_select_them_and_star_title() {
        let mut nb = notebook();
        let root = nb.selected().unwrap();

        let child = nb.add_child().unwrap();
        assert_eq!(nb.selected(), Some(child));
        assert_eq!(nb.tree().parent(child).unwrap(), Some(root));
        assert_eq!(nb.tree().title(child).unwrap(), "New Node");

        let sibling = nb.add_sibling().unwrap();
        assert_eq!(nb.selected(), Some(sibling));
        assert_eq!(nb.tree().children(root).unwrap(), &[child, sibling]);

        assert!(nb.needs_save_prompt());
        assert_eq!(nb.display_title(), "MyTreePad - New Document *");
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut nb = notebook();
        nb.add_child().unwrap();
        nb.add_child().unwrap();

        assert_eq!(nb.delete_selected().unwrap(), 1);
        assert_eq!(nb.selected(), None);
        assert_eq!(nb.delete_selected().unwrap(), 0);
    }

    #[test]
    fn test_copy_paste_gives_fresh_identities() {
        let mut nb = notebook();
        let root = nb.selected().unwrap();
        let child = nb.add_child().unwrap();
        nb.set_content(child, "payload").unwrap();
        nb.add_child().unwrap();

        nb.select(Some(child)).unwrap();
        assert!(nb.copy().unwrap());

        nb.select(None).unwrap();
        let first = nb.paste().unwrap();
        nb.select(None).unwrap();
        let second = nb.paste().unwrap();

        assert_ne!(first, second);
        assert_ne!(first, child);
        assert_eq!(nb.tree().roots(), &[root, first, second]);
        assert_eq!(nb.tree().content(second).unwrap(), "payload");
        assert_eq!(nb.tree().children(second).unwrap().len(), 1);
        assert_eq!(nb.selected(), Some(second));
    }

    #[test]
    fn test_paste_under_selection() {
        let mut nb = notebook();
        let root = nb.selected().unwrap();
        nb.copy().unwrap();
        let pasted = nb.paste().unwrap();
        assert_eq!(nb.tree().parent(pasted).unwrap(), Some(root));
        assert_eq!(nb.tree().depth(pasted).unwrap(), 1);
    }

    #[test]
    fn test_copy_without_selection() {
        let mut nb = notebook();
        nb.select(None).unwrap();
        assert!(!nb.copy().unwrap());
        assert!(matches!(nb.paste(), Err(NotebookError::NothingToPaste)));
    }

    #[test]
    fn test_clipboard_is_a_snapshot() {
        let mut nb = notebook();
        let root = nb.selected().unwrap();
        nb.copy().unwrap();
        nb.set_content(root, "changed").unwrap();

        nb.select(None).unwrap();
        let pasted = nb.paste().unwrap();
        assert_eq!(nb.tree().content(pasted).unwrap(), "This is the root node.");
    }

    #[test]
    fn test_select_rejects_foreign_node() {
        let mut nb = notebook();
        let result = nb.select(Some(NodeId::new()));
        assert!(matches!(result, Err(NotebookError::Tree(TreeError::InvalidTarget(_)))));
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut nb = notebook();
        let root = nb.selected().unwrap();
        nb.set_content(root, "abc").unwrap();
        nb.set_cursor(99);
        assert_eq!(nb.cursor(), 3);
    }

    #[test]
    fn test_save_without_path() {
        let mut nb = notebook();
        assert!(matches!(nb.save(), Err(NotebookError::NoFilePath)));
    }

    #[test]
    fn test_save_as_open_round_trip() {
        let mut nb = notebook();
        let child = nb.add_child().unwrap();
        nb.set_title(child, "Groceries").unwrap();
        nb.set_content(child, "milk\neggs").unwrap();

        nb.save_as("lists.hjt").unwrap();
        assert!(!nb.is_modified());
        assert_eq!(nb.display_title(), "MyTreePad - lists.hjt");

        nb.new_document();
        assert_eq!(nb.tree().len(), 1);
        assert!(nb.path().is_none());

        nb.open("lists.hjt").unwrap();
        assert_eq!(nb.tree().len(), 2);
        assert_eq!(nb.selected(), nb.tree().first_root());
        let groceries = nb.find_by_title("Groceries").unwrap();
        assert_eq!(nb.tree().content(groceries).unwrap(), "milk\neggs");
        assert!(!nb.is_modified());
    }

    #[test]
    fn test_failed_open_keeps_document() {
        let mut nb = notebook();
        nb.add_child().unwrap();
        let mut io = MemoryNotebookIo::new();
        io.insert("bad.hjt", "not an outline");
        nb.io = io;

        let result = nb.open("bad.hjt");
        assert!(matches!(result, Err(NotebookError::Codec(ref e)) if e.is_format()));
        assert_eq!(nb.tree().len(), 2);
        assert!(nb.path().is_none());

        let result = nb.open("missing.hjt");
        assert!(matches!(result, Err(NotebookError::Codec(CodecError::Io(_)))));
    }

    #[test]
    fn test_find_moves_selection() {
        let mut nb = notebook();
        let root = nb.selected().unwrap();
        let child = nb.add_child().unwrap();
        nb.set_content(child, "the needle is here").unwrap();
        nb.select(Some(root)).unwrap();

        let found = nb
            .find_next("needle", SearchScope::AllNodes, SearchOptions::new())
            .unwrap();
        assert_eq!(found, Some(Match::new(child, 4, 6)));
        assert_eq!(nb.selected(), Some(child));
        assert_eq!(nb.cursor(), 4);
    }

    #[test]
    fn test_replace_next_moves_selection() {
        let mut nb = notebook();
        let root = nb.selected().unwrap();
        nb.set_content(root, "one two").unwrap();
        nb.tree.set_modified(false);

        let replaced = nb
            .replace_next("two", "three", SearchScope::CurrentNode, SearchOptions::new())
            .unwrap();
        assert!(replaced);
        assert_eq!(nb.tree().content(root).unwrap(), "one three");
        assert_eq!(nb.cursor(), 4);
        assert!(nb.is_modified());
    }

    #[test]
    fn test_open_resets_search() {
        let mut nb = notebook();
        nb.find_next("root", SearchScope::AllNodes, SearchOptions::new())
            .unwrap();
        assert!(nb.search_state().query().is_some());

        nb.save_as("a.hjt").unwrap();
        nb.open("a.hjt").unwrap();
        assert!(nb.search_state().query().is_none());
    }

    #[test]
    fn test_replace_all_clamps_cursor() {
        let mut nb = notebook();
        let root = nb.selected().unwrap();
        nb.set_content(root, "aaaa").unwrap();
        nb.set_cursor(4);

        let count = nb
            .replace_all("a", "", SearchScope::CurrentNode, SearchOptions::new())
            .unwrap();
        assert_eq!(count, 4);
        assert_eq!(nb.cursor(), 0);
    }
}
