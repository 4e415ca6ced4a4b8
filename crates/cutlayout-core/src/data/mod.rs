//! Data models for cut layouts
//!
//! This module provides:
//! - Planar primitives (points, footprints, stock, bounding boxes)
//! - The in-memory layout model (placements, sheets, layouts)
//! - The JSON wire payload exchanged with the optimizer and storage

pub mod geometry;
pub mod layout;
pub mod payload;

pub use geometry::{Bounds, Point, Rect, Stock, GEOMETRY_EPSILON};
pub use layout::{Layout, Placement, Sheet};
pub use payload::{LayoutPayload, PieceSpec, PlacementPayload, SheetPayload};
