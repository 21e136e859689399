//! Error types for parsing and path matching.

use thiserror::Error;

/// Errors that can occur while parsing JSON text or matching a path expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JtreeError {
    /// The input text was not a valid document.
    /// `position` is the byte offset of the cursor when the failure was detected.
    #[error("parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// A step that needs an object was applied to another kind of value.
    #[error("{type_name} is not an object")]
    NotAnObject { type_name: &'static str },

    /// A step that needs an array was applied to another kind of value.
    #[error("{type_name} is not an array")]
    NotAnArray { type_name: &'static str },

    /// A named lookup found no member with that name.
    #[error("no value '{0}'")]
    MissingField(String),

    /// A bracket step held something other than `?size`, `n`, `a,b` or nothing.
    #[error("invalid array index '{0}'")]
    InvalidIndex(String),

    /// The path expression itself is malformed.
    #[error("invalid match expression '{expression}': {message}")]
    InvalidExpression { expression: String, message: String },

    /// A serde_json value that cannot be the root of a tree (scalars).
    #[error("root value must be an object or array, got {0}")]
    UnsupportedRoot(&'static str),
}

/// Broad classification of a [`JtreeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input text.
    Parse,
    /// A path step's structural expectation was violated.
    Match,
    /// A serde_json value could not be turned into a tree.
    Conversion,
}

impl JtreeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JtreeError::Parse { .. } => ErrorKind::Parse,
            JtreeError::UnsupportedRoot(_) => ErrorKind::Conversion,
            JtreeError::NotAnObject { .. }
            | JtreeError::NotAnArray { .. }
            | JtreeError::MissingField(_)
            | JtreeError::InvalidIndex(_)
            | JtreeError::InvalidExpression { .. } => ErrorKind::Match,
        }
    }

    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        JtreeError::Parse {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn expression(expression: &str, message: impl Into<String>) -> Self {
        JtreeError::InvalidExpression {
            expression: expression.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout jtree-core.
pub type Result<T> = std::result::Result<T, JtreeError>;
