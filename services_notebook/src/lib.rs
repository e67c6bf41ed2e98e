//! # Notebook Service
//!
//! An editing session over one outline document: file path, selection,
//! cursor, clipboard and find/replace, on top of the tree, codec and search
//! crates.
//!
//! ## Philosophy
//!
//! - **All-or-nothing open**: A file that fails to decode leaves the current document alone
//! - **Pluggable storage**: File access goes through `NotebookIo`
//! - **Host-agnostic**: Prompts, dialogs and rendering belong to the caller
//!
//! ## Example
//!
//! ```
//! use services_notebook::{MemoryNotebookIo, Notebook, NotebookSettings};
//!
//! let mut notebook = Notebook::with_io(MemoryNotebookIo::new(), NotebookSettings::default());
//! let child = notebook.add_child().unwrap();
//! notebook.set_content(child, "hello").unwrap();
//! notebook.save_as("notes.hjt").unwrap();
//!
//! assert_eq!(notebook.display_title(), "MyTreePad - notes.hjt");
//! ```

pub mod config;
pub mod io;
pub mod notebook;

pub use config::NotebookSettings;
pub use io::{FsNotebookIo, MemoryNotebookIo, NotebookIo};
pub use notebook::{Notebook, NotebookError, NotebookResult};
