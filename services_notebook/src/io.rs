//! Notebook file I/O

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Whole-file storage used by a notebook session
///
/// Each call opens and closes whatever it needs; nothing stays open
/// between calls.
pub trait NotebookIo {
    fn read(&mut self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the file at `path` with `bytes`
    fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsNotebookIo;

impl NotebookIo for FsNotebookIo {
    fn read(&mut self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(bytes)?;
        writer.flush()
    }
}

/// In-memory file map
#[derive(Debug, Clone, Default)]
pub struct MemoryNotebookIo {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryNotebookIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.files.get(path.as_ref()).map(Vec::as_slice)
    }
}

impl NotebookIo for MemoryNotebookIo {
    fn read(&mut self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}
