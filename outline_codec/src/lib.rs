//! # Outline Codec
//!
//! Reads and writes the depth-marker outline file format.
//!
//! ## Format
//!
//! ```text
//! <Treepad version 3.0>
//! dt=Text
//! <node>
//! {title}
//! {depth}
//! {content lines...}
//! <end node> 5P9i0s8y19Z
//! ...
//! ```
//!
//! Blocks are written in pre-order. The depth line is the only structural
//! signal: there are no parent pointers, and the decoder rebuilds the tree
//! from the depth sequence with a level map (depth -> last node seen at
//! that depth).
//!
//! ## Design
//!
//! - `encode`/`decode` are pure functions over byte buffers
//! - `load`/`save` scope the file handle to a single call
//! - Decoding is all-or-nothing: it builds a fresh tree and returns it only on success
//! - Text encoding and line endings are configurable; the default is UTF-8 with `\n`

pub mod decode;
pub mod encode;
pub mod error;
pub mod format;

pub use decode::{decode, decode_str, load, read_from};
pub use encode::{encode, encode_to_string, save, write_to};
pub use error::{CodecError, CodecResult};
pub use format::{CodecOptions, LineEnding, TextEncoding, HEADER, NODE_END, NODE_START, NODE_TYPE};
