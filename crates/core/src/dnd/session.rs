//! Drag session state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resolver::DropTarget;
use crate::task::{Task, TaskId, TaskStatus, TaskStore};
use crate::{Error, Result};

/// Where the drag state machine currently is. Committing and cancelling are
/// instantaneous and always end back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    /// No session
    Idle,
    /// Session open, no valid drop target
    Dragging,
    /// Session open with a preview order on screen
    Previewing,
}

impl DragPhase {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Which sensor opened the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    Pointer,
    Keyboard,
}

/// One continuous drag, from pick-up to drop or cancel
#[derive(Debug, Clone)]
pub struct DragSession {
    pub source_task_id: TaskId,
    /// Snapshot taken at pick-up, restored by cancelling
    pub original_index: usize,
    pub original_status: TaskStatus,
    pub input_mode: InputMode,
    pub started_at: DateTime<Utc>,
    target: Option<DropTarget>,
    preview: Option<Vec<Task>>,
    preview_updates: u32,
}

impl DragSession {
    /// Open a session for `task_id`, snapshotting its committed position
    pub fn new(store: &TaskStore, task_id: TaskId, input_mode: InputMode) -> Result<Self> {
        let original_index = store
            .position(&task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
        let original_status = store.list()[original_index].status;

        Ok(Self {
            source_task_id: task_id,
            original_index,
            original_status,
            input_mode,
            started_at: Utc::now(),
            target: None,
            preview: None,
            preview_updates: 0,
        })
    }

    pub fn phase(&self) -> DragPhase {
        if self.target.is_some() {
            DragPhase::Previewing
        } else {
            DragPhase::Dragging
        }
    }

    pub fn target(&self) -> Option<&DropTarget> {
        self.target.as_ref()
    }

    pub fn preview_order(&self) -> Option<&[Task]> {
        self.preview.as_deref()
    }

    /// Index of the dragged task within the preview order
    pub fn current_preview_index(&self) -> Option<usize> {
        self.preview
            .as_ref()?
            .iter()
            .position(|t| t.id == self.source_task_id)
    }

    /// Column the dragged task would land in if dropped now
    pub fn current_preview_status(&self) -> Option<TaskStatus> {
        self.target.map(|t| t.status())
    }

    /// Number of times the preview target changed
    pub fn preview_updates(&self) -> u32 {
        self.preview_updates
    }

    pub(crate) fn set_preview(&mut self, target: Option<DropTarget>, preview: Option<Vec<Task>>) {
        self.target = target;
        self.preview = preview;
        self.preview_updates += 1;
    }

    /// Swap in a recomputed preview for the same target
    pub(crate) fn replace_preview(&mut self, preview: Option<Vec<Task>>) {
        self.preview = preview;
    }
}
