//! Codec errors

use thiserror::Error;

/// Outline codec error
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("Structural error at line {line}: depth {depth} has no parent at depth {}", .depth - 1)]
    Structural { line: usize, depth: usize },

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl CodecError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        CodecError::Format {
            line,
            message: message.into(),
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, CodecError::Format { .. })
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, CodecError::Structural { .. })
    }
}

/// Codec result
pub type CodecResult<T> = Result<T, CodecError>;
