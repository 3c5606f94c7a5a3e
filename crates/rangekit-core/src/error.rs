//! Error handling for RangeKit
//!
//! Provides the error types shared across the workspace:
//! - Diagram errors (malformed stage-diagram documents)
//! - A crate-spanning `Error` that wraps them together with I/O failures
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Diagram import error
///
/// Raised when a stage-diagram document cannot be imported. Every variant
/// names the offending field or element so the host can point the user at it.
#[derive(Error, Debug)]
pub enum DiagramError {
    /// A value that must be a JSON object is something else
    #[error("Expected '{field}' to be an object")]
    NotAnObject {
        /// Path of the offending field.
        field: String,
    },

    /// A required field is absent
    #[error("Missing required field '{field}'")]
    MissingField {
        /// Path of the missing field.
        field: String,
    },

    /// A field is present but its value is unusable
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Range dimensions must both be positive
    #[error("Invalid dimensions {width} x {height}: both must be positive")]
    InvalidDimensions {
        /// The rejected width.
        width: f64,
        /// The rejected height.
        height: f64,
    },

    /// An element failed to parse or validate
    #[error("Invalid element at index {index}: {reason}")]
    InvalidElement {
        /// Position of the element in the `elements` array.
        index: usize,
        /// Why the element was rejected.
        reason: String,
    },

    /// Two elements share the same id
    #[error("Duplicate element id '{id}'")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// The document is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiagramError {
    /// Shorthand for an `InvalidField` error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DiagramError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an `InvalidElement` error.
    pub fn invalid_element(index: usize, reason: impl Into<String>) -> Self {
        DiagramError::InvalidElement {
            index,
            reason: reason.into(),
        }
    }
}

/// Main error type for RangeKit
#[derive(Error, Debug)]
pub enum Error {
    /// Diagram error
    #[error(transparent)]
    Diagram(#[from] DiagramError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a diagram error
    pub fn is_diagram_error(&self) -> bool {
        matches!(self, Error::Diagram(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Diagram(DiagramError::Json(err))
    }
}

/// Result type for RangeKit operations
pub type Result<T> = std::result::Result<T, Error>;
