//! Kanban board view definitions
//!
//! Columns are derived from the ordered task sequence and are designed to be
//! sent to the rendering frontend as-is.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId, TaskStatus};

/// A column in the kanban board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanColumn {
    pub id: TaskStatus,
    pub title: String,
    pub task_ids: Vec<TaskId>,
}

impl KanbanColumn {
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }
}

/// Derive the three columns, left to right, from a task sequence
pub fn board_columns(tasks: &[Task]) -> Vec<KanbanColumn> {
    TaskStatus::ALL
        .iter()
        .map(|status| KanbanColumn {
            id: *status,
            title: status.title().to_string(),
            task_ids: tasks
                .iter()
                .filter(|t| t.status == *status)
                .map(|t| t.id)
                .collect(),
        })
        .collect()
}

/// Everything the view needs to draw the board at one instant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    /// Committed order, after the search filter (list layout)
    pub tasks: Vec<Task>,
    pub columns: Vec<KanbanColumn>,
    /// Task being dragged, if a drag session is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_task_id: Option<TaskId>,
    /// Candidate order shown while dragging; never committed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_tasks: Option<Vec<Task>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_columns: Option<Vec<KanbanColumn>>,
}

impl BoardSnapshot {
    pub fn new(tasks: Vec<Task>) -> Self {
        let columns = board_columns(&tasks);
        Self {
            tasks,
            columns,
            active_task_id: None,
            preview_tasks: None,
            preview_columns: None,
        }
    }

    /// Attach the live drag state
    pub fn with_preview(mut self, active_task_id: TaskId, preview: Option<Vec<Task>>) -> Self {
        self.active_task_id = Some(active_task_id);
        self.preview_columns = preview.as_deref().map(board_columns);
        self.preview_tasks = preview;
        self
    }

    pub fn column(&self, status: TaskStatus) -> Option<&KanbanColumn> {
        self.columns.iter().find(|c| c.id == status)
    }
}
