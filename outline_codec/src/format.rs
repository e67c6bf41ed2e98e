//! File format constants and codec options

use crate::error::{CodecError, CodecResult};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// First line of every outline file
pub const HEADER: &str = "<Treepad version 3.0>";

/// Marker opening a node block
pub const NODE_TYPE: &str = "dt=Text";

/// Line following the node type marker
pub const NODE_START: &str = "<node>";

/// Sentinel closing a node block. Any line starting with it ends the block.
pub const NODE_END: &str = "<end node> 5P9i0s8y19Z";

/// Line terminator written by the encoder
///
/// The decoder accepts either terminator regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LineEnding::Lf => "lf",
            LineEnding::CrLf => "crlf",
        }
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lf" | "unix" => Ok(LineEnding::Lf),
            "crlf" | "windows" => Ok(LineEnding::CrLf),
            other => Err(format!("Unknown line ending: {}", other)),
        }
    }
}

/// Byte encoding of the persisted file
///
/// Defaults to UTF-8. Any WHATWG label known to `encoding_rs` whose encoder
/// writes the same encoding it reads is accepted (this excludes UTF-16).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    pub fn utf8() -> Self {
        Self(encoding_rs::UTF_8)
    }

    /// Look up an encoding by label, e.g. `"utf-8"` or `"windows-1252"`
    pub fn for_label(label: &str) -> Option<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())?;
        if encoding.output_encoding() != encoding {
            return None;
        }
        Some(Self(encoding))
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Encode text, refusing characters the encoding cannot represent
    pub fn encode<'a>(&self, text: &'a str) -> CodecResult<Cow<'a, [u8]>> {
        let (bytes, _, unmappable) = self.0.encode(text);
        if unmappable {
            return Err(CodecError::Encoding(format!(
                "text contains characters not representable in {}",
                self.name()
            )));
        }
        Ok(bytes)
    }

    /// Decode bytes, stripping a leading byte order mark
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> CodecResult<Cow<'a, str>> {
        let (text, had_errors) = self.0.decode_with_bom_removal(bytes);
        if had_errors {
            return Err(CodecError::Encoding(format!(
                "input is not valid {}",
                self.name()
            )));
        }
        Ok(text)
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextEncoding({})", self.name())
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Options shared by encode and decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOptions {
    pub encoding: TextEncoding,
    pub line_ending: LineEnding,
}

impl CodecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}
