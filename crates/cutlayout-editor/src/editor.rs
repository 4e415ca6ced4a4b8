//! Edit-session lifecycle.
//!
//! [`LayoutEditor`] owns the original layout, the optional edited layout, and
//! at most one working copy. The edited layout overrides the original when
//! present. Entering edit mode clones the authoritative layout; pointer input
//! mutates only that clone; saving promotes it to the edited layout.
//!
//! A save is split into [`LayoutEditor::begin_save`] and
//! [`LayoutEditor::complete_save`] so a caller can drive the gateway itself;
//! [`LayoutEditor::save`] does both around an awaited gateway call.

use crate::drag::{
    DragController, DragFrame, DragOptions, DropOutcome, GhostPreview, PointerEvent,
};
use crate::error::EditorResult;
use crate::model;
use crate::persistence::{PersistenceGateway, PersistenceResult};
use crate::view::{LayoutView, ViewOptions};
use cutlayout_core::{EditError, Layout, LayoutPayload, PieceLookup, Point};
use uuid::Uuid;

/// A working copy handed out for saving
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub id: Uuid,
    pub layout: Layout,
}

#[derive(Debug)]
struct EditSession {
    id: Uuid,
    working: Layout,
    drag: DragController,
    modified: bool,
    span: tracing::Span,
}

/// Owner of one job's layouts and its edit session
#[derive(Debug)]
pub struct LayoutEditor {
    original: Option<Layout>,
    edited: Option<Layout>,
    lookup: PieceLookup,
    options: DragOptions,
    session: Option<EditSession>,
    pending_save: Option<Uuid>,
}

impl LayoutEditor {
    /// Creates an editor from optional payloads.
    ///
    /// A payload that fails to load is treated as absent.
    pub fn new(
        original: Option<LayoutPayload>,
        edited: Option<LayoutPayload>,
        options: DragOptions,
    ) -> Self {
        Self::from_layouts(
            original.and_then(|p| load_or_warn(p, "original")),
            edited.and_then(|p| load_or_warn(p, "edited")),
            options,
        )
    }

    /// Creates an editor from already loaded layouts.
    pub fn from_layouts(
        original: Option<Layout>,
        edited: Option<Layout>,
        options: DragOptions,
    ) -> Self {
        let mut editor = Self {
            original,
            edited,
            lookup: PieceLookup::default(),
            options,
            session: None,
            pending_save: None,
        };
        editor.rebuild_lookup();
        editor
    }

    /// The edited layout if one exists, otherwise the original.
    pub fn authoritative(&self) -> Option<&Layout> {
        self.edited.as_ref().or(self.original.as_ref())
    }

    pub fn original(&self) -> Option<&Layout> {
        self.original.as_ref()
    }

    /// The working copy while editing, otherwise the authoritative layout.
    pub fn display_layout(&self) -> Option<&Layout> {
        match &self.session {
            Some(session) => Some(&session.working),
            None => self.authoritative(),
        }
    }

    pub fn lookup(&self) -> &PieceLookup {
        &self.lookup
    }

    /// Whether an edited layout overrides the original.
    pub fn has_edits(&self) -> bool {
        self.edited.is_some()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the working copy differs from the layout it was cloned from.
    pub fn is_modified(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.modified)
    }

    pub fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.id)
    }

    /// Clones the authoritative layout into a working copy.
    ///
    /// Returns the session id. Entering while already editing keeps the
    /// current session.
    pub fn enter_edit_mode(&mut self) -> EditorResult<Uuid> {
        if let Some(session) = &self.session {
            return Ok(session.id);
        }
        let working = self
            .authoritative()
            .map(model::clone_layout)
            .ok_or(EditError::NoLayout)?;

        let id = Uuid::new_v4();
        let span = tracing::info_span!("edit_session", %id);
        span.in_scope(|| {
            tracing::info!(
                sheets = working.sheets.len(),
                placements = working.placement_count(),
                "edit mode entered"
            )
        });
        self.session = Some(EditSession {
            id,
            working,
            drag: DragController::new(self.options),
            modified: false,
            span,
        });
        Ok(id)
    }

    /// Discards the working copy.
    pub fn leave_edit_mode(&mut self) -> EditorResult<()> {
        if self.pending_save.is_some() {
            return Err(EditError::SaveInFlight.into());
        }
        if let Some(session) = self.session.take() {
            session.span.in_scope(|| {
                tracing::info!(modified = session.modified, "edit mode left; working copy discarded")
            });
        }
        Ok(())
    }

    /// Enters or leaves edit mode, returning whether editing is now active.
    pub fn toggle_edit_mode(&mut self) -> EditorResult<bool> {
        if self.is_editing() {
            self.leave_edit_mode()?;
            Ok(false)
        } else {
            self.enter_edit_mode()?;
            Ok(true)
        }
    }

    pub fn pointer_down(&mut self, event: PointerEvent) -> Option<(usize, usize)> {
        let session = self.interactive_session()?;
        let _enter = session.span.clone().entered();
        session.drag.pointer_down(&session.working, event)
    }

    pub fn pointer_move(&mut self, event: PointerEvent) -> Option<DragFrame> {
        let session = self.interactive_session()?;
        let _enter = session.span.clone().entered();
        session.drag.pointer_move(&session.working, event)
    }

    pub fn pointer_up(&mut self) -> Option<DropOutcome> {
        let session = self.interactive_session()?;
        let _enter = session.span.clone().entered();
        let outcome = session.drag.pointer_up(&mut session.working)?;
        if outcome.is_mutation() {
            session.modified = true;
        }
        Some(outcome)
    }

    /// Abandons an active drag, returning where the piece stays.
    pub fn pointer_cancel(&mut self) -> Option<Point> {
        self.session.as_mut()?.drag.cancel()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.drag.is_dragging())
    }

    pub fn ghost(&self) -> Option<GhostPreview> {
        self.session.as_ref()?.drag.ghost()
    }

    /// View of the display layout.
    pub fn view(&self, options: &ViewOptions) -> Option<LayoutView> {
        self.display_layout()
            .map(|layout| LayoutView::build(layout, &self.lookup, options))
    }

    /// Hands out the working copy for saving.
    ///
    /// Any active drag is cancelled. Pointer input is ignored until
    /// [`complete_save`](Self::complete_save) is called.
    pub fn begin_save(&mut self) -> EditorResult<SaveRequest> {
        if self.pending_save.is_some() {
            return Err(EditError::SaveInFlight.into());
        }
        let session = self.session.as_mut().ok_or(EditError::NotEditing)?;
        session.drag.cancel();

        let request = SaveRequest {
            id: Uuid::new_v4(),
            layout: session.working.clone(),
        };
        session.span.in_scope(|| tracing::info!(request = %request.id, "save started"));
        self.pending_save = Some(request.id);
        Ok(request)
    }

    /// Applies the gateway's answer to an outstanding save.
    ///
    /// On success the working copy becomes the edited layout and edit mode
    /// ends. On failure the working copy stays exactly as it was and the
    /// gateway error is returned.
    pub fn complete_save(
        &mut self,
        request: Uuid,
        outcome: PersistenceResult<()>,
    ) -> EditorResult<()> {
        if self.pending_save != Some(request) {
            return Err(EditError::StaleSave {
                request: request.to_string(),
            }
            .into());
        }
        self.pending_save = None;

        if let Err(e) = outcome {
            tracing::warn!(%request, error = %e, "save failed; edits kept locally");
            return Err(e.into());
        }

        let session = self.session.take().ok_or(EditError::NotEditing)?;
        session.span.in_scope(|| tracing::info!(%request, "save completed"));
        self.edited = Some(session.working);
        self.rebuild_lookup();
        Ok(())
    }

    /// Saves the working copy through `gateway`.
    pub async fn save(&mut self, gateway: &dyn PersistenceGateway) -> EditorResult<()> {
        let request = self.begin_save()?;
        let outcome = gateway.save(&request.layout).await;
        self.complete_save(request.id, outcome)
    }

    /// Deletes the edited layout so the original becomes authoritative again.
    ///
    /// Any working copy is discarded on success. On failure nothing changes.
    pub async fn reset(&mut self, gateway: &dyn PersistenceGateway) -> EditorResult<()> {
        if self.pending_save.is_some() {
            return Err(EditError::SaveInFlight.into());
        }
        if let Err(e) = gateway.reset().await {
            tracing::warn!(error = %e, "reset failed; layouts unchanged");
            return Err(e.into());
        }

        self.session = None;
        self.edited = None;
        self.rebuild_lookup();
        tracing::info!("reset to original layout");
        Ok(())
    }

    fn interactive_session(&mut self) -> Option<&mut EditSession> {
        if self.pending_save.is_some() {
            tracing::debug!("pointer input ignored while saving");
            return None;
        }
        self.session.as_mut()
    }

    fn rebuild_lookup(&mut self) {
        self.lookup = self
            .authoritative()
            .map(PieceLookup::build)
            .unwrap_or_default();
    }
}

fn load_or_warn(payload: LayoutPayload, which: &str) -> Option<Layout> {
    match model::load(payload) {
        Ok(layout) => Some(layout),
        Err(e) => {
            tracing::warn!(which, error = %e, "layout payload rejected; treating as absent");
            None
        }
    }
}
