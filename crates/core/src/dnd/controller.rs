//! Drag session controller
//!
//! Owns at most one [`DragSession`] and drives it through
//! `Idle -> Dragging/Previewing -> commit | cancel -> Idle`. Previews are
//! computed from the committed order and never written to the store; the
//! store is written exactly once, on commit.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::geometry::{Layout, Rect};
use super::keyboard::{keyboard_target, Direction};
use super::reorder::reorder;
use super::resolver::{DropTarget, DropTargetResolver};
use super::session::{DragPhase, DragSession, InputMode};
use crate::task::{Task, TaskId, TaskStore};
use crate::Result;

/// Input geometry for one drag event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InteractionGeometry {
    /// Current rectangle of the dragged card plus the measured board
    Pointer { dragged: Rect, layout: Layout },
    /// Logical step from the current placement; `None` keeps it in place
    Keyboard {
        #[serde(default)]
        step: Option<Direction>,
    },
}

impl InteractionGeometry {
    pub fn input_mode(&self) -> InputMode {
        match self {
            Self::Pointer { .. } => InputMode::Pointer,
            Self::Keyboard { .. } => InputMode::Keyboard,
        }
    }
}

/// Why a session ended without a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// Released with no valid drop target
    NoTarget,
    /// Explicit cancel, e.g. Escape
    Cancelled,
}

/// Result of feeding one input event to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragUpdate {
    /// Event did not apply: no session, or a second pick-up during a drag
    Ignored,
    Started {
        task_id: TaskId,
        target: Option<DropTarget>,
    },
    /// The preview target changed and a new preview order is available
    Preview {
        task_id: TaskId,
        target: Option<DropTarget>,
    },
    /// Same target as before; nothing to redraw
    Unchanged,
    Committed {
        task_id: TaskId,
        target: DropTarget,
        /// False when the drop left the order as it was
        moved: bool,
    },
    Cancelled {
        task_id: TaskId,
        reason: CancelReason,
    },
}

impl DragUpdate {
    /// Whether the view has something new to draw
    pub fn needs_render(&self) -> bool {
        !matches!(self, Self::Ignored | Self::Unchanged)
    }
}

/// Single-drag state machine
#[derive(Debug, Clone)]
pub struct DragController {
    resolver: DropTargetResolver,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(resolver: DropTargetResolver) -> Self {
        Self {
            resolver,
            session: None,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.session
            .as_ref()
            .map_or(DragPhase::Idle, DragSession::phase)
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn active_task_id(&self) -> Option<TaskId> {
        self.session.as_ref().map(|s| s.source_task_id)
    }

    pub fn preview_order(&self) -> Option<&[Task]> {
        self.session.as_ref()?.preview_order()
    }

    /// Pick up `task_id`. Ignored while another session is open.
    pub fn start(
        &mut self,
        store: &TaskStore,
        task_id: TaskId,
        geometry: &InteractionGeometry,
    ) -> Result<DragUpdate> {
        if let Some(active) = &self.session {
            warn!(
                active = %active.source_task_id,
                requested = %task_id,
                "Drag already in progress, ignoring pick-up"
            );
            return Ok(DragUpdate::Ignored);
        }

        let mut session = DragSession::new(store, task_id, geometry.input_mode())?;
        let target = self.resolve(store, &session, geometry);
        if target.is_some() {
            let preview = compute_preview(store, &session, target)?;
            session.set_preview(target, preview);
        }

        debug!(
            task_id = %task_id,
            index = session.original_index,
            status = %session.original_status,
            mode = ?session.input_mode,
            "Drag started"
        );
        self.session = Some(session);
        Ok(DragUpdate::Started { task_id, target })
    }

    /// Drag moved. Recomputes the preview only when the target changes.
    pub fn update(&mut self, store: &TaskStore, geometry: &InteractionGeometry) -> Result<DragUpdate> {
        let Some(session) = &self.session else {
            return Ok(DragUpdate::Ignored);
        };

        let target = self.resolve(store, session, geometry);
        if target.as_ref() == session.target() {
            return Ok(DragUpdate::Unchanged);
        }
        // Anchoring on the dragged card means "where it is now", which is the
        // current preview slot, not its committed position.
        let anchors_on_source =
            target.as_ref().and_then(DropTarget::anchor) == Some(&session.source_task_id);
        if anchors_on_source && session.target().is_some() {
            trace!(task_id = %session.source_task_id, "Target is the dragged card, keeping preview");
            return Ok(DragUpdate::Unchanged);
        }

        let preview = compute_preview(store, session, target)?;
        let Some(session) = self.session.as_mut() else {
            return Ok(DragUpdate::Ignored);
        };
        session.set_preview(target, preview);
        debug!(
            task_id = %session.source_task_id,
            ?target,
            preview_index = ?session.current_preview_index(),
            "Drag preview updated"
        );

        Ok(DragUpdate::Preview {
            task_id: session.source_task_id,
            target,
        })
    }

    /// Drop. Commits when a target is set, otherwise cancels.
    ///
    /// The session is closed either way; on error the store is untouched.
    pub fn end(&mut self, store: &mut TaskStore) -> Result<DragUpdate> {
        let Some(session) = self.session.take() else {
            return Ok(DragUpdate::Ignored);
        };
        let task_id = session.source_task_id;

        let Some(target) = session.target().copied() else {
            debug!(task_id = %task_id, "Dropped outside any target, cancelling");
            return Ok(DragUpdate::Cancelled {
                task_id,
                reason: CancelReason::NoTarget,
            });
        };

        let next = reorder(store.list(), &task_id, &target, target.status()).map_err(|e| {
            warn!(task_id = %task_id, "Failed to compute committed order: {}", e);
            e
        })?;
        let moved = next.as_slice() != store.list();
        store.replace_order(next)?;

        info!(task_id = %task_id, ?target, moved, "Drag committed");
        Ok(DragUpdate::Committed {
            task_id,
            target,
            moved,
        })
    }

    /// Recompute the preview against the current store, keeping the target.
    ///
    /// Called after the committed order changed underneath an open session.
    pub fn refresh(&mut self, store: &TaskStore) -> Result<()> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        let preview = compute_preview(store, session, session.target().copied())?;
        if let Some(session) = self.session.as_mut() {
            session.replace_preview(preview);
        }
        Ok(())
    }

    /// Abandon the current drag; the store is never touched
    pub fn cancel(&mut self) -> DragUpdate {
        match self.session.take() {
            Some(session) => {
                debug!(
                    task_id = %session.source_task_id,
                    previews = session.preview_updates(),
                    "Drag cancelled"
                );
                DragUpdate::Cancelled {
                    task_id: session.source_task_id,
                    reason: CancelReason::Cancelled,
                }
            }
            None => DragUpdate::Ignored,
        }
    }

    fn resolve(
        &self,
        store: &TaskStore,
        session: &DragSession,
        geometry: &InteractionGeometry,
    ) -> Option<DropTarget> {
        match geometry {
            InteractionGeometry::Pointer { dragged, layout } => {
                self.resolver
                    .resolve(&session.source_task_id, dragged, layout)
            }
            InteractionGeometry::Keyboard { step } => {
                let current = session.preview_order().unwrap_or(store.list());
                keyboard_target(current, &session.source_task_id, *step)
            }
        }
    }
}

fn compute_preview(
    store: &TaskStore,
    session: &DragSession,
    target: Option<DropTarget>,
) -> Result<Option<Vec<Task>>> {
    target
        .map(|t| reorder(store.list(), &session.source_task_id, &t, t.status()))
        .transpose()
}
