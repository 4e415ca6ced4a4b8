//! Drag state machine.
//!
//! The controller is `Idle` until a pointer-down lands on a piece, then
//! `Dragging` until pointer-up or [`DragController::cancel`]. Pointer-move
//! never touches the layout; all mutation happens on pointer-up, and a
//! cross-sheet drop is applied atomically through
//! [`model::transfer_placement`].
//!
//! The layout passed to each event must be the same working copy for the
//! whole session. A session whose piece disappeared from the layout is
//! dropped with a warning.

mod types;

pub use types::{
    DragFrame, DragOptions, DragSession, DragState, DragTarget, DropOutcome, GhostPreview,
    PointerEvent,
};

use crate::collision::{self, Obstacles};
use crate::model;
use cutlayout_core::{Layout, Point, Rect, Stock};

/// Pointer-driven placement editor
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    options: DragOptions,
}

impl DragController {
    pub fn new(options: DragOptions) -> Self {
        Self {
            state: DragState::Idle,
            options,
        }
    }

    pub fn options(&self) -> DragOptions {
        self.options
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Current ghost preview, if the pointer is over another sheet.
    pub fn ghost(&self) -> Option<GhostPreview> {
        self.session().and_then(DragSession::ghost)
    }

    /// Starts a drag if the pointer is over a piece.
    ///
    /// Returns the grabbed `(sheet, index)`. Ignored while a drag is active or
    /// when nothing is under the pointer.
    pub fn pointer_down(&mut self, layout: &Layout, event: PointerEvent) -> Option<(usize, usize)> {
        if self.is_dragging() {
            tracing::debug!("pointer-down ignored: drag already active");
            return None;
        }

        let sheet = event.sheet?;
        let index = model::placement_at(layout, sheet, event.position)?;
        let placement = layout.placement(sheet, index).ok()?;
        let origin = placement.position();

        tracing::debug!(sheet, index, x = origin.x, y = origin.y, "drag started");
        self.state = DragState::Dragging(DragSession {
            source_sheet: sheet,
            source_index: index,
            rect: placement.rect,
            offset: event.position.offset_from(origin),
            origin,
            last_valid_position: origin,
            target: DragTarget::SourceSheet,
        });
        Some((sheet, index))
    }

    /// Tracks the pointer and reports what to draw.
    ///
    /// Returns `None` when no drag is active.
    pub fn pointer_move(&mut self, layout: &Layout, event: PointerEvent) -> Option<DragFrame> {
        let options = self.options;
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        if layout
            .placement(session.source_sheet, session.source_index)
            .is_err()
        {
            tracing::warn!(
                sheet = session.source_sheet,
                index = session.source_index,
                "dragged placement no longer exists; dropping session"
            );
            self.state = DragState::Idle;
            return None;
        }

        let target = event.position.offset_from(session.offset);
        match event.sheet.filter(|s| *s < layout.sheets.len()) {
            Some(sheet) if sheet == session.source_sheet => {
                let placements = &layout.sheets[sheet].placements;
                let resolved = collision::resolve_same_sheet_move(
                    target,
                    &session.rect,
                    layout.kerf,
                    Obstacles::excluding(placements, session.source_index),
                    &layout.stock,
                    session.last_valid_position,
                );
                tracing::debug!(
                    sheet,
                    target_x = target.x,
                    target_y = target.y,
                    x = resolved.x,
                    y = resolved.y,
                    "same-sheet move"
                );
                session.last_valid_position = resolved;
                session.target = DragTarget::SourceSheet;
            }
            Some(sheet) => {
                let placements = &layout.sheets[sheet].placements;
                let resolved = collision::resolve_push_placement(
                    target,
                    &session.rect,
                    layout.kerf,
                    Obstacles::all(placements),
                    &layout.stock,
                    options.max_push_passes,
                );
                let (candidate, valid) = match resolved {
                    Some(position) => (position, true),
                    None => (
                        collision::clamp_to_stock(target, &session.rect, &layout.stock),
                        false,
                    ),
                };
                tracing::debug!(
                    sheet,
                    x = candidate.x,
                    y = candidate.y,
                    valid,
                    "cross-sheet candidate"
                );
                session.target = DragTarget::OtherSheet {
                    sheet,
                    candidate,
                    valid,
                };
            }
            None => session.target = DragTarget::OffSurface,
        }

        let ghost = session.ghost();
        Some(DragFrame {
            live_position: session.last_valid_position,
            source_faded: ghost.is_some(),
            ghost,
        })
    }

    /// Ends the drag and commits the result into `layout`.
    ///
    /// Returns `None` when no drag was active. The controller is always idle
    /// afterwards.
    pub fn pointer_up(&mut self, layout: &mut Layout) -> Option<DropOutcome> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        let (sheet, index) = (session.source_sheet, session.source_index);
        if layout.placement(sheet, index).is_err() {
            tracing::warn!(sheet, index, "dragged placement no longer exists; drop ignored");
            return None;
        }
        let rejected = DropOutcome::Rejected {
            sheet,
            index,
            origin: session.origin,
        };

        let outcome = match session.target {
            DragTarget::OtherSheet {
                sheet: to_sheet,
                candidate,
                valid: true,
            } => self.drop_on_other_sheet(layout, &session, to_sheet, candidate),
            DragTarget::OtherSheet { valid: false, .. } => {
                tracing::debug!(sheet, index, "cross-sheet drop has no free position");
                None
            }
            DragTarget::SourceSheet | DragTarget::OffSurface => {
                self.drop_on_source_sheet(layout, &session)
            }
        };

        let outcome = outcome.unwrap_or(rejected);
        match &outcome {
            DropOutcome::Rejected { origin, .. } => {
                tracing::info!(sheet, index, x = origin.x, y = origin.y, "drop rejected")
            }
            DropOutcome::Moved { to, .. } => {
                tracing::info!(sheet, index, x = to.x, y = to.y, "placement moved")
            }
            DropOutcome::Transferred { transfer, .. } => tracing::info!(
                from_sheet = sheet,
                to_sheet = transfer.sheet,
                pruned = transfer.source_pruned,
                "placement transferred"
            ),
        }
        Some(outcome)
    }

    /// Abandons the drag without touching the layout.
    ///
    /// Returns the position the piece stays at.
    pub fn cancel(&mut self) -> Option<Point> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                tracing::debug!(
                    sheet = session.source_sheet,
                    index = session.source_index,
                    "drag cancelled"
                );
                Some(session.origin)
            }
            DragState::Idle => None,
        }
    }

    fn drop_on_source_sheet(
        &self,
        layout: &mut Layout,
        session: &DragSession,
    ) -> Option<DropOutcome> {
        let (sheet, index) = (session.source_sheet, session.source_index);
        let placements = &layout.sheets.get(sheet)?.placements;
        let obstacles = Obstacles::excluding(placements, index);
        let position = self.snap(
            session.last_valid_position,
            &session.rect,
            obstacles,
            &layout.stock,
            layout.kerf,
        );
        if !is_free(position, &session.rect, obstacles, &layout.stock, layout.kerf) {
            tracing::warn!(sheet, index, "resolved position collides at drop");
            return None;
        }

        model::set_position(layout, sheet, index, position).ok()?;
        Some(DropOutcome::Moved {
            sheet,
            index,
            from: session.origin,
            to: position,
        })
    }

    fn drop_on_other_sheet(
        &self,
        layout: &mut Layout,
        session: &DragSession,
        to_sheet: usize,
        candidate: Point,
    ) -> Option<DropOutcome> {
        let placements = &layout.sheets.get(to_sheet)?.placements;
        let obstacles = Obstacles::all(placements);
        let position = self.snap(candidate, &session.rect, obstacles, &layout.stock, layout.kerf);
        if !is_free(position, &session.rect, obstacles, &layout.stock, layout.kerf) {
            tracing::debug!(to_sheet, "cross-sheet candidate collides at drop");
            return None;
        }

        match model::transfer_placement(
            layout,
            session.source_sheet,
            session.source_index,
            to_sheet,
            position,
        ) {
            Ok(transfer) => Some(DropOutcome::Transferred {
                from_sheet: session.source_sheet,
                from_index: session.source_index,
                transfer,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "transfer failed; layout unchanged");
                None
            }
        }
    }

    fn snap(
        &self,
        position: Point,
        rect: &Rect,
        obstacles: Obstacles<'_>,
        stock: &Stock,
        kerf: f64,
    ) -> Point {
        if !self.options.snap_to_whole_units {
            return position;
        }
        let rounded = position.rounded();
        if rounded != position && is_free(rounded, rect, obstacles, stock, kerf) {
            rounded
        } else {
            position
        }
    }
}

// In bounds and clear of every obstacle; checked before any commit.
fn is_free(
    position: Point,
    rect: &Rect,
    obstacles: Obstacles<'_>,
    stock: &Stock,
    kerf: f64,
) -> bool {
    stock.contains(position.x, position.y, rect)
        && !collision::has_collision(
            position.x,
            position.y,
            rect.width,
            rect.height,
            obstacles,
            kerf,
        )
}
