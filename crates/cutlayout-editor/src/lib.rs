//! # Cutlayout Editor
//!
//! Interactive manual adjustment of an optimized cut layout. A user drags
//! placed pieces within a sheet or onto another sheet; the editor keeps the
//! layout free of overlaps, inside the stock, and with up-to-date waste
//! figures.
//!
//! ## Architecture
//!
//! ```text
//! LayoutEditor (original / edited / working copy, save + reset)
//!   ├── DragController (Idle <-> Dragging state machine)
//!   │     ├── collision (kerf overlap, slide and push resolution)
//!   │     └── model (load, remove/append, prune, atomic transfer)
//!   │           └── waste (per-sheet and job-wide waste)
//!   ├── PersistenceGateway (memory or JSON file)
//!   └── LayoutView (headings, piece colors and labels, summary)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cutlayout_editor::{DragOptions, LayoutEditor, MemoryGateway, PointerEvent};
//!
//! let mut editor = LayoutEditor::new(Some(original), None, DragOptions::default());
//! editor.enter_edit_mode()?;
//! editor.pointer_down(PointerEvent::on_sheet(0, 210.0, 10.0));
//! editor.pointer_move(PointerEvent::on_sheet(1, 400.0, 120.0));
//! editor.pointer_up();
//! editor.save(&MemoryGateway::new()).await?;
//! ```

pub mod audit;
pub mod collision;
pub mod drag;
pub mod editor;
pub mod error;
pub mod model;
pub mod persistence;
pub mod view;
pub mod waste;

pub use audit::{audit, is_geometrically_valid, Violation};
pub use collision::{
    clamp_to_stock, has_collision, overlaps, resolve_push_placement, resolve_same_sheet_move,
    Obstacles, DEFAULT_MAX_PUSH_PASSES,
};
pub use drag::{
    DragController, DragFrame, DragOptions, DragSession, DragState, DragTarget, DropOutcome,
    GhostPreview, PointerEvent,
};
pub use editor::{LayoutEditor, SaveRequest};
pub use error::{EditorError, EditorResult};
pub use model::Transfer;
pub use persistence::{
    FileGateway, MemoryGateway, PersistenceError, PersistenceGateway, PersistenceResult,
    SavedLayout,
};
pub use view::{LayoutView, PieceView, SheetView, ViewOptions};

pub use cutlayout_core::{Layout, LayoutPayload, PieceLookup, Placement, Point, Rect, Sheet, Stock};
