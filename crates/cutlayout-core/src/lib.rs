//! # Cutlayout Core
//!
//! Core types and utilities for cutlayout.
//! Provides the layout data model shared by the editor and the renderer,
//! the JSON payload exchanged with the optimizer and storage, the piece
//! lookup table, and the error types used across the workspace.

pub mod data;
pub mod error;
pub mod lookup;

pub use data::{
    Bounds, Layout, LayoutPayload, PieceSpec, Placement, PlacementPayload, Point, Rect, Sheet,
    SheetPayload, Stock, GEOMETRY_EPSILON,
};

pub use error::{EditError, LayoutError};

pub use lookup::{piece_key, PieceLookup, FALLBACK_COLOR, PIECE_PALETTE};
