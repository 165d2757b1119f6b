//! In-memory ordered task store
//!
//! Holds the single global task sequence. Column contents are derived by
//! filtering this sequence by status, so a cross-column move is one splice.

use std::collections::{HashMap, HashSet};

use tracing::{error, info};

use super::model::{Task, TaskDraft, TaskId, TaskStatus};
use crate::{Error, Result};

/// The committed, ordered task collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing sequence.
    ///
    /// Fails if two tasks share an id.
    pub fn with_tasks(tasks: Vec<Task>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id) {
                return Err(Error::InvalidInput(format!(
                    "Task with ID {} already exists",
                    task.id
                )));
            }
        }
        Ok(Self { tasks })
    }

    /// Current committed order
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by ID
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// Index of a task within the global sequence
    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == *id)
    }

    /// Validate a draft and append the resulting task to the end of the sequence
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        let task = Task::from_draft(draft)?;
        info!(task_id = %task.id, status = %task.status, "Created task: {}", task.title);
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Atomically swap the committed sequence.
    ///
    /// The new sequence must be a permutation of the current one in which at
    /// most one task's status differs. Anything else is rejected with
    /// [`Error::Invariant`] and leaves the store untouched.
    pub fn replace_order(&mut self, sequence: Vec<Task>) -> Result<()> {
        if let Err(e) = verify_permutation(&self.tasks, &sequence) {
            error!("Rejected reorder: {}", e);
            return Err(e);
        }
        self.tasks = sequence;
        Ok(())
    }

    /// Tasks in one column, in committed order
    pub fn filter_by_status(&self, status: TaskStatus) -> Vec<Task> {
        filter_by_status(&self.tasks, status)
    }
}

/// Stable sub-sequence of `tasks` with the given status
pub fn filter_by_status(tasks: &[Task], status: TaskStatus) -> Vec<Task> {
    tasks.iter().filter(|t| t.status == status).cloned().collect()
}

/// Check that `next` is `current` reordered, with at most one status change
/// and no other field touched.
pub fn verify_permutation(current: &[Task], next: &[Task]) -> Result<()> {
    if current.len() != next.len() {
        return Err(Error::Invariant(format!(
            "expected {} tasks, got {}",
            current.len(),
            next.len()
        )));
    }

    let originals: HashMap<TaskId, &Task> = current.iter().map(|t| (t.id, t)).collect();
    let mut seen = HashSet::with_capacity(next.len());
    let mut status_changes = 0usize;

    for task in next {
        let Some(original) = originals.get(&task.id) else {
            return Err(Error::Invariant(format!("unknown task {}", task.id)));
        };
        if !seen.insert(task.id) {
            return Err(Error::Invariant(format!("task {} appears twice", task.id)));
        }
        if task.status != original.status {
            status_changes += 1;
        }
        if task.with_status(original.status) != **original {
            return Err(Error::Invariant(format!(
                "task {} changed fields other than status",
                task.id
            )));
        }
    }

    if status_changes > 1 {
        return Err(Error::Invariant(format!(
            "{} tasks changed status in one move",
            status_changes
        )));
    }

    Ok(())
}
