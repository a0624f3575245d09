//! Error types for Cutline.

use thiserror::Error;

/// Main error type for Cutline operations.
///
/// None of these are fatal: the engine stays usable after any rejected
/// operation and leaves the model untouched.
#[derive(Error, Debug)]
pub enum CutlineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command was issued without its precondition (no selection, empty
    /// clipboard, split point outside the item).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Track not found: {0}")]
    TrackNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CutlineError {
    /// Shorthand for [`CutlineError::InvalidOperation`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// True for the not-found class of errors (track or item lookups).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TrackNotFound(_) | Self::ItemNotFound(_))
    }
}

/// Result type alias for Cutline operations.
pub type Result<T> = std::result::Result<T, CutlineError>;
