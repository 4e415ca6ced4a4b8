//! Error handling for cutlayout
//!
//! Provides error types for the layout layers:
//! - Layout errors (malformed payloads, invariant violations, bad indices)
//! - Edit errors (edit-session state machine violations)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Layout error type
///
/// Raised when a payload cannot become a [`crate::Layout`] or when a model
/// operation addresses a sheet or placement that does not exist. A layout that
/// fails to load is treated by callers as absent, never as a crash.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The payload carries no `sheets` array
    #[error("Invalid layout: missing sheets")]
    MissingSheets,

    /// The payload is not a layout object at all
    #[error("Invalid layout: {reason}")]
    Malformed {
        /// Parser message.
        reason: String,
    },

    /// Stock dimensions are zero, negative, or not finite
    #[error("Invalid layout: stock dimensions {width}x{height} must be positive")]
    InvalidStock {
        /// Stock width as read from the payload.
        width: f64,
        /// Stock height as read from the payload.
        height: f64,
    },

    /// Kerf is negative or not finite
    #[error("Invalid layout: kerf {kerf} must be a non-negative number")]
    InvalidKerf {
        /// Kerf as read from the payload.
        kerf: f64,
    },

    /// A placement has a degenerate footprint or non-finite coordinates
    #[error("Invalid placement {index} on sheet {sheet}: {reason}")]
    InvalidPlacement {
        /// Sheet index of the offending placement.
        sheet: usize,
        /// Placement index within the sheet.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Sheet index does not exist
    #[error("Sheet {sheet} out of range ({count} sheets)")]
    SheetOutOfRange {
        /// The requested sheet index.
        sheet: usize,
        /// Number of sheets in the layout.
        count: usize,
    },

    /// Placement index does not exist on the sheet
    #[error("Placement {index} out of range on sheet {sheet} ({count} placements)")]
    PlacementOutOfRange {
        /// The sheet that was addressed.
        sheet: usize,
        /// The requested placement index.
        index: usize,
        /// Number of placements on that sheet.
        count: usize,
    },
}

/// Edit error type
///
/// Represents requests that are not valid for the current edit-session state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// There is no loaded layout to edit
    #[error("No layout loaded")]
    NoLayout,

    /// The operation requires edit mode
    #[error("Not in edit mode")]
    NotEditing,

    /// A save request is already outstanding for this working copy
    #[error("A save is already in flight")]
    SaveInFlight,

    /// The completed save does not belong to the current request
    #[error("Save request {request} does not match the outstanding save")]
    StaleSave {
        /// The request id that was completed.
        request: String,
    },
}
