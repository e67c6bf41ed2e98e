//! Tree -> outline file

use crate::error::CodecResult;
use crate::format::{CodecOptions, LineEnding, HEADER, NODE_END, NODE_START, NODE_TYPE};
use log::{debug, warn};
use note_tree::DocumentTree;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render the outline as text
///
/// Blocks follow pre-order, each depth being the node's ancestor count.
/// Content is written verbatim; a line break is appended only when non-empty
/// content does not already end with one, so the end marker starts its own
/// line. Titles are single lines: embedded line breaks become spaces.
pub fn encode_to_string(tree: &DocumentTree, line_ending: LineEnding) -> String {
    let eol = line_ending.as_str();
    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str(eol);

    for node in tree.pre_order() {
        out.push_str(NODE_TYPE);
        out.push_str(eol);
        out.push_str(NODE_START);
        out.push_str(eol);

        let title = node.title();
        if title.contains(['\r', '\n']) {
            warn!("{} title contains line breaks; writing them as spaces", node.id());
            out.push_str(&title.replace("\r\n", " ").replace(['\r', '\n'], " "));
        } else {
            out.push_str(title);
        }
        out.push_str(eol);

        out.push_str(&node.depth().to_string());
        out.push_str(eol);

        let content = node.content();
        if !content.is_empty() {
            out.push_str(content);
            if !content.ends_with('\n') {
                out.push_str(eol);
            }
        }

        out.push_str(NODE_END);
        out.push_str(eol);
    }

    out
}

/// Encode the outline into bytes using the configured text encoding
pub fn encode(tree: &DocumentTree, options: &CodecOptions) -> CodecResult<Vec<u8>> {
    let text = encode_to_string(tree, options.line_ending);
    let bytes = options.encoding.encode(&text)?;
    debug!(
        "encoded {} nodes into {} bytes ({})",
        tree.len(),
        bytes.len(),
        options.encoding
    );
    Ok(bytes.into_owned())
}

/// Encode the outline into a writer
pub fn write_to<W: Write>(writer: &mut W, tree: &DocumentTree, options: &CodecOptions) -> CodecResult<()> {
    let bytes = encode(tree, options)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Write the outline to `path`, replacing any existing file
///
/// The tree is fully encoded before the file is opened, so an encoding
/// failure leaves an existing file untouched.
pub fn save(path: impl AsRef<Path>, tree: &DocumentTree, options: &CodecOptions) -> CodecResult<()> {
    let path = path.as_ref();
    let bytes = encode(tree, options)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    debug!("saved outline to {}", path.display());
    Ok(())
}
