//! Search-box filtering over the committed order

use serde::Deserialize;

use super::model::{Task, TaskStatus};

/// Read-only filter: case-insensitive substring of title or description,
/// optionally restricted to one column
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    #[serde(default, rename = "q")]
    pub query: String,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|s| s != task.status) {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        needle.is_empty()
            || task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    }

    /// Matching tasks, in the order given
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}
