//! Error handling for document generation
//!
//! This module provides a unified error type and result type for all
//! document operations. Capacity errors abort the table being rendered;
//! everything recoverable (missing pictures, odd call sequences) is
//! reported as a [`DocWarning`] instead.

use std::fmt;

use thiserror::Error;

/// Document generation error type
#[derive(Debug, Error)]
pub enum DocGenError {
    /// A table declared more columns than can be addressed by a column letter
    #[error("number of table columns is {columns}, should be <= {max}")]
    TooManyColumns { columns: usize, max: usize },
    /// The multicolumn id counter ran past its last identifier
    #[error("can't increment span counter of length {width}: all identifiers used")]
    SpanCounterExhausted { width: usize },
    /// A style name that is not part of the style sheet
    #[error("unknown {kind} style '{name}'")]
    UnknownStyle { kind: StyleKind, name: String },
    /// A table was started while another one is buffered
    #[error("table started inside an open table; nested tables are not supported")]
    NestedTable,
    /// Content was written before the document was opened
    #[error("document is not open")]
    NotOpen,
    /// IO error while writing the output file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A recorded call script could not be read
    #[error("invalid call script: {0}")]
    Script(#[from] serde_json::Error),
}

/// Which part of the style sheet a lookup went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Paragraph,
    Cell,
    Table,
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleKind::Paragraph => write!(f, "paragraph"),
            StyleKind::Cell => write!(f, "cell"),
            StyleKind::Table => write!(f, "table"),
        }
    }
}

/// Result type for document operations
pub type DocGenResult<T> = Result<T, DocGenError>;

// Convenience constructors for errors
impl DocGenError {
    pub fn too_many_columns(columns: usize, max: usize) -> Self {
        DocGenError::TooManyColumns { columns, max }
    }

    pub fn unknown_style(kind: StyleKind, name: impl Into<String>) -> Self {
        DocGenError::UnknownStyle {
            kind,
            name: name.into(),
        }
    }

    /// Whether this error only invalidates the current table
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            DocGenError::TooManyColumns { .. } | DocGenError::SpanCounterExhausted { .. }
        )
    }
}

/// Non-fatal issue noticed while rendering
#[derive(Debug, Clone, PartialEq)]
pub struct DocWarning {
    pub message: String,
    pub suggestion: Option<String>,
}

impl DocWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }
}

impl fmt::Display for DocWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Warning: {}", self.message)?;
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}
