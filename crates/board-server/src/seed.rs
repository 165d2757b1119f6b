//! Demo tasks the board starts with

use board_core::task::{Task, TaskDraft, TaskPriority, TaskStatus};
use board_core::{Error, Result};
use chrono::NaiveDate;

fn draft(
    title: &str,
    description: &str,
    priority: TaskPriority,
    status: TaskStatus,
    due: &str,
    tag: &str,
) -> Result<TaskDraft> {
    let due_date: NaiveDate = due
        .parse()
        .map_err(|e| Error::InvalidInput(format!("Bad demo date {}: {}", due, e)))?;
    Ok(TaskDraft::new(title)
        .with_description(description)
        .with_priority(priority)
        .with_status(status)
        .with_due_date(due_date)
        .with_tag(tag))
}

pub fn demo_tasks() -> Result<Vec<Task>> {
    [
        draft(
            "Design System Update",
            "Update the primary brand colors in Figma",
            TaskPriority::High,
            TaskStatus::Todo,
            "2023-12-24",
            "design",
        ),
        draft(
            "API Integration",
            "Connect the frontend to the new GraphQL endpoint",
            TaskPriority::Medium,
            TaskStatus::InProgress,
            "2023-12-25",
            "dev",
        ),
        draft(
            "User Research",
            "Conduct interviews with 5 potential users",
            TaskPriority::Low,
            TaskStatus::Done,
            "2023-12-22",
            "research",
        ),
    ]
    .into_iter()
    .map(|d| d.and_then(Task::from_draft))
    .collect()
}
