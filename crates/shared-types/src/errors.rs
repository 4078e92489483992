//! # Error Types
//!
//! Errors shared across the field-state crates.

use thiserror::Error;

/// Errors produced while parsing a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Two separators with nothing between them, or an empty `[]`.
    #[error("Empty path segment in '{pattern}'")]
    EmptySegment { pattern: String },

    /// A `[` without its matching `]`.
    #[error("Unclosed bracket in '{pattern}'")]
    UnclosedBracket { pattern: String },

    /// Bracketed content that is not an array index.
    #[error("Invalid index '{index}' in '{pattern}'")]
    InvalidIndex { pattern: String, index: String },

    /// Trailing characters after a bracketed index.
    #[error("Unexpected character '{found}' in '{pattern}'")]
    UnexpectedCharacter { pattern: String, found: char },
}
