//! Outline file -> tree

use crate::error::{CodecError, CodecResult};
use crate::format::{CodecOptions, HEADER, NODE_END, NODE_START, NODE_TYPE};
use log::{debug, warn};
use note_tree::{DocumentTree, NodeId};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::SplitInclusive;

/// Line reader that keeps terminators available for verbatim content
struct Lines<'a> {
    inner: SplitInclusive<'a, char>,
    /// 1-based number of the last line handed out
    line: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_inclusive('\n'),
            line: 0,
        }
    }

    /// Next line including its terminator
    fn next_raw(&mut self) -> Option<&'a str> {
        let raw = self.inner.next()?;
        self.line += 1;
        Some(raw)
    }

    /// Next line without its terminator (`\n` or `\r\n`)
    fn next_line(&mut self) -> Option<&'a str> {
        self.next_raw().map(strip_eol)
    }

    fn expect_line(&mut self, what: &str) -> CodecResult<&'a str> {
        self.next_line().ok_or_else(|| {
            CodecError::format(
                self.line + 1,
                format!("unexpected end of file, expected {}", what),
            )
        })
    }
}

fn strip_eol(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Decode outline text into a fresh, unmodified tree
pub fn decode_str(text: &str) -> CodecResult<DocumentTree> {
    let mut lines = Lines::new(text);
    match lines.next_line() {
        Some(header) if header == HEADER => {}
        _ => return Err(CodecError::format(1, "not a valid outline file")),
    }

    let mut tree = DocumentTree::empty();
    let mut levels: HashMap<usize, NodeId> = HashMap::new();

    while let Some(line) = lines.next_line() {
        if line.trim().is_empty() {
            continue;
        }
        if line != NODE_TYPE {
            return Err(CodecError::format(
                lines.line,
                format!("expected `{}`, found `{}`", NODE_TYPE, line),
            ));
        }
        decode_block(&mut lines, &mut tree, &mut levels)?;
    }

    tree.set_modified(false);
    Ok(tree)
}

/// Decode one block following a `dt=Text` line and attach it via the level map
fn decode_block(
    lines: &mut Lines<'_>,
    tree: &mut DocumentTree,
    levels: &mut HashMap<usize, NodeId>,
) -> CodecResult<()> {
    let start = lines.expect_line("`<node>`")?;
    if start != NODE_START {
        return Err(CodecError::format(
            lines.line,
            format!("expected `{}`, found `{}`", NODE_START, start),
        ));
    }

    let title = lines.expect_line("node title")?;
    let depth_text = lines.expect_line("node depth")?;
    let depth_line = lines.line;
    let depth: usize = depth_text.trim().parse().map_err(|_| {
        CodecError::format(depth_line, format!("invalid depth `{}`", depth_text))
    })?;

    let mut content = String::new();
    loop {
        let raw = lines
            .next_raw()
            .ok_or_else(|| CodecError::format(lines.line, "unterminated node block"))?;
        if raw.starts_with(NODE_END) {
            break;
        }
        content.push_str(raw);
    }
    let content = content.trim_end_matches(['\r', '\n']);

    let id = if depth == 0 {
        tree.append_root(title, content)
    } else {
        let structural = CodecError::Structural {
            line: depth_line,
            depth,
        };
        let parent = match levels.get(&(depth - 1)) {
            Some(parent) => *parent,
            None => return Err(structural),
        };
        tree.append_child(parent, title, content)
            .map_err(|_| structural)?
    };
    levels.insert(depth, id);
    Ok(())
}

/// Decode outline bytes using the configured text encoding
pub fn decode(bytes: &[u8], options: &CodecOptions) -> CodecResult<DocumentTree> {
    let text = options.encoding.decode(bytes)?;
    let tree = decode_str(&text)?;
    debug!(
        "decoded {} nodes from {} bytes ({})",
        tree.len(),
        bytes.len(),
        options.encoding
    );
    Ok(tree)
}

/// Read a whole outline from `reader`
pub fn read_from<R: Read>(reader: &mut R, options: &CodecOptions) -> CodecResult<DocumentTree> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(&bytes, options)
}

/// Load an outline file
///
/// The file is closed before decoding starts.
pub fn load(path: impl AsRef<Path>, options: &CodecOptions) -> CodecResult<DocumentTree> {
    let path = path.as_ref();
    let bytes = {
        let mut file = File::open(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        bytes
    };
    decode(&bytes, options).map_err(|err| {
        warn!("failed to decode {}: {}", path.display(), err);
        err
    })
}
