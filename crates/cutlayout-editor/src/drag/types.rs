//! Types shared by the drag state machine and its callers.

use crate::collision::DEFAULT_MAX_PUSH_PASSES;
use crate::model::Transfer;
use cutlayout_core::{Point, Rect};

/// A pointer sample from the rendering surface.
///
/// `sheet` is the sheet surface under the pointer, or `None` when the pointer
/// is between or outside the sheets. `position` is in stock units relative to
/// that surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub sheet: Option<usize>,
    pub position: Point,
}

impl PointerEvent {
    /// Pointer over a sheet surface.
    pub fn on_sheet(sheet: usize, x: f64, y: f64) -> Self {
        Self {
            sheet: Some(sheet),
            position: Point::new(x, y),
        }
    }

    /// Pointer not over any sheet.
    pub fn off_surface() -> Self {
        Self {
            sheet: None,
            position: Point::default(),
        }
    }
}

/// Tunables for the drag controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOptions {
    /// Pass budget for push placement on another sheet.
    pub max_push_passes: u32,
    /// Round committed positions to whole units when the result stays valid.
    pub snap_to_whole_units: bool,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            max_push_passes: DEFAULT_MAX_PUSH_PASSES,
            snap_to_whole_units: true,
        }
    }
}

/// Where the pointer was last tracked during a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTarget {
    /// Over the sheet the piece came from.
    SourceSheet,
    /// Over a different sheet. `candidate` is the resolved drop position when
    /// `valid`, otherwise the clamped pointer target.
    OtherSheet {
        sheet: usize,
        candidate: Point,
        valid: bool,
    },
    /// Not over any sheet.
    OffSurface,
}

/// State of an active drag
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub source_sheet: usize,
    pub source_index: usize,
    /// Footprint of the dragged piece.
    pub rect: Rect,
    /// Pointer position minus piece origin at pointer-down.
    pub offset: Point,
    /// Piece position when the drag began.
    pub origin: Point,
    /// Last collision-free position on the source sheet.
    pub last_valid_position: Point,
    pub target: DragTarget,
}

impl DragSession {
    /// Ghost to draw for the current target, if any.
    pub fn ghost(&self) -> Option<GhostPreview> {
        match self.target {
            DragTarget::OtherSheet {
                sheet,
                candidate,
                valid,
            } => Some(GhostPreview {
                sheet,
                position: candidate,
                rect: self.rect,
                valid,
            }),
            _ => None,
        }
    }
}

/// Translucent drop preview on a sheet other than the source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPreview {
    pub sheet: usize,
    pub position: Point,
    pub rect: Rect,
    /// False when no collision-free drop position was found.
    pub valid: bool,
}

/// What the renderer should show after a pointer-move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    /// Where the dragged piece is drawn on its source sheet.
    pub live_position: Point,
    /// The source piece is faded while a ghost is shown elsewhere.
    pub source_faded: bool,
    pub ghost: Option<GhostPreview>,
}

/// Result of ending a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    /// Placement moved within its sheet. `from == to` when nothing changed.
    Moved {
        sheet: usize,
        index: usize,
        from: Point,
        to: Point,
    },
    /// Placement moved to another sheet.
    Transferred {
        from_sheet: usize,
        from_index: usize,
        transfer: Transfer,
    },
    /// Drop refused; the placement stays at `origin`.
    Rejected {
        sheet: usize,
        index: usize,
        origin: Point,
    },
}

impl DropOutcome {
    /// Whether the working copy was changed.
    pub fn is_mutation(&self) -> bool {
        match self {
            DropOutcome::Moved { from, to, .. } => from != to,
            DropOutcome::Transferred { .. } => true,
            DropOutcome::Rejected { .. } => false,
        }
    }
}

/// Drag controller state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}
