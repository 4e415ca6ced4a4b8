//! Error types for the edit session.

use crate::persistence::PersistenceError;
use cutlayout_core::{EditError, LayoutError};
use thiserror::Error;

/// Errors surfaced by [`LayoutEditor`](crate::LayoutEditor).
#[derive(Error, Debug)]
pub enum EditorError {
    /// The request does not fit the current session state.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// The layout itself is invalid.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The gateway failed; edits remain local.
    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

impl EditorError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EditorError::Persistence(_))
    }
}

/// Result type alias for editor operations.
pub type EditorResult<T> = std::result::Result<T, EditorError>;
