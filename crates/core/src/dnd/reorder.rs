//! Reorder engine
//!
//! Pure splice over the global task sequence. Used both to compute the
//! preview shown while dragging and the order written on commit.

use super::resolver::DropTarget;
use crate::task::{verify_permutation, Task, TaskId, TaskStatus};
use crate::{Error, Result};

/// Move `source_id` to `target`, switching it to `target_status`.
///
/// The result is a permutation of `sequence` in which only the moved task's
/// status may differ and every other task keeps its relative order. Dropping
/// a task in front of itself returns the sequence unchanged.
pub fn reorder(
    sequence: &[Task],
    source_id: &TaskId,
    target: &DropTarget,
    target_status: TaskStatus,
) -> Result<Vec<Task>> {
    let source_index = sequence
        .iter()
        .position(|t| t.id == *source_id)
        .ok_or_else(|| Error::TaskNotFound(source_id.to_string()))?;

    if target.anchor() == Some(source_id) {
        return Ok(sequence.to_vec());
    }
    if target.status() != target_status {
        return Err(Error::InvalidInput(format!(
            "Drop target is in column {} but move targets {}",
            target.status(),
            target_status
        )));
    }

    let mut next = sequence.to_vec();
    let mut task = next.remove(source_index);
    task.status = target_status;

    let insert_at = match target {
        DropTarget::BeforeTask { task_id, .. } => {
            let index = next
                .iter()
                .position(|t| t.id == *task_id)
                .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
            if next[index].status != target_status {
                return Err(Error::InvalidInput(format!(
                    "Task {} is not in column {}",
                    task_id, target_status
                )));
            }
            index
        }
        // Right after the column's last task; an empty column keeps the
        // task where it already sits in the global order
        DropTarget::ColumnEnd { .. } => next
            .iter()
            .rposition(|t| t.status == target_status)
            .map_or(source_index, |last| last + 1),
    };

    next.insert(insert_at, task);
    debug_assert!(verify_permutation(sequence, &next).is_ok());
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{filter_by_status, TaskDraft};
    use rstest::rstest;

    fn task(title: &str, status: TaskStatus) -> Task {
        Task::from_draft(TaskDraft::new(title).with_status(status)).unwrap()
    }

    /// `[A(todo), B(todo), C(done)]`
    fn abc() -> Vec<Task> {
        vec![
            task("A", TaskStatus::Todo),
            task("B", TaskStatus::Todo),
            task("C", TaskStatus::Done),
        ]
    }

    fn titles(tasks: &[Task]) -> Vec<(&str, TaskStatus)> {
        tasks.iter().map(|t| (t.title.as_str(), t.status)).collect()
    }

    fn before(task: &Task) -> DropTarget {
        DropTarget::BeforeTask {
            task_id: task.id,
            status: task.status,
        }
    }

    #[test]
    fn test_cross_column_move_before_sibling() {
        let seq = abc();
        let target = before(&seq[2]);

        let next = reorder(&seq, &seq[0].id, &target, TaskStatus::Done).unwrap();

        assert_eq!(
            titles(&next),
            vec![
                ("B", TaskStatus::Todo),
                ("A", TaskStatus::Done),
                ("C", TaskStatus::Done)
            ]
        );
    }

    #[test]
    fn test_move_onto_empty_column() {
        let seq = abc();
        let target = DropTarget::ColumnEnd {
            status: TaskStatus::InProgress,
        };

        let next = reorder(&seq, &seq[1].id, &target, TaskStatus::InProgress).unwrap();

        assert_eq!(next.len(), seq.len());
        let doing = filter_by_status(&next, TaskStatus::InProgress);
        assert_eq!(titles(&doing), vec![("B", TaskStatus::InProgress)]);
        assert_eq!(next[1].id, seq[1].id);
    }

    #[test]
    fn test_column_end_appends_after_last_in_column() {
        let seq = vec![
            task("A", TaskStatus::Done),
            task("B", TaskStatus::Todo),
            task("C", TaskStatus::Done),
            task("D", TaskStatus::Todo),
        ];
        let target = DropTarget::ColumnEnd {
            status: TaskStatus::Done,
        };

        let next = reorder(&seq, &seq[3].id, &target, TaskStatus::Done).unwrap();

        assert_eq!(
            titles(&next),
            vec![
                ("A", TaskStatus::Done),
                ("B", TaskStatus::Todo),
                ("C", TaskStatus::Done),
                ("D", TaskStatus::Done)
            ]
        );
    }

    #[test]
    fn test_same_column_move_up() {
        let seq = vec![
            task("A", TaskStatus::Todo),
            task("B", TaskStatus::Todo),
            task("C", TaskStatus::Todo),
        ];
        let next = reorder(&seq, &seq[2].id, &before(&seq[0]), TaskStatus::Todo).unwrap();
        let names: Vec<&str> = next.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_same_column_reorder_keeps_column_membership() {
        let seq = vec![
            task("A", TaskStatus::Todo),
            task("X", TaskStatus::Done),
            task("B", TaskStatus::Todo),
            task("C", TaskStatus::Todo),
        ];
        let next = reorder(&seq, &seq[0].id, &before(&seq[3]), TaskStatus::Todo).unwrap();

        let mut before_ids: Vec<TaskId> = filter_by_status(&seq, TaskStatus::Todo)
            .iter()
            .map(|t| t.id)
            .collect();
        let after: Vec<Task> = filter_by_status(&next, TaskStatus::Todo);
        let after_names: Vec<&str> = after.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(after_names, vec!["B", "A", "C"]);

        let mut after_ids: Vec<TaskId> = after.iter().map(|t| t.id).collect();
        before_ids.sort();
        after_ids.sort();
        assert_eq!(before_ids, after_ids);
        assert_eq!(filter_by_status(&next, TaskStatus::Done), filter_by_status(&seq, TaskStatus::Done));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    fn test_drop_onto_itself_is_noop(#[case] index: usize) {
        let seq = abc();
        let t = &seq[index];
        let next = reorder(&seq, &t.id, &before(t), t.status).unwrap();
        assert_eq!(next, seq);
    }

    #[rstest]
    #[case(0, 2, TaskStatus::Done)]
    #[case(2, 0, TaskStatus::Todo)]
    #[case(1, 0, TaskStatus::Todo)]
    #[case(0, 1, TaskStatus::Todo)]
    fn test_reorder_is_a_permutation(
        #[case] source: usize,
        #[case] anchor: usize,
        #[case] status: TaskStatus,
    ) {
        let seq = abc();
        let next = reorder(&seq, &seq[source].id, &before(&seq[anchor]), status).unwrap();

        assert_eq!(next.len(), seq.len());
        let mut ids: Vec<TaskId> = seq.iter().map(|t| t.id).collect();
        let mut next_ids: Vec<TaskId> = next.iter().map(|t| t.id).collect();
        ids.sort();
        next_ids.sort();
        assert_eq!(ids, next_ids);

        // Only the moved task may change status
        for t in &next {
            let original = seq.iter().find(|o| o.id == t.id).unwrap();
            if t.id != seq[source].id {
                assert_eq!(t, original);
            }
        }

        // Everyone else keeps their relative order
        let others = |tasks: &[Task]| -> Vec<TaskId> {
            tasks
                .iter()
                .filter(|t| t.id != seq[source].id)
                .map(|t| t.id)
                .collect()
        };
        assert_eq!(others(&next), others(&seq));
    }

    #[rstest]
    #[case(TaskStatus::InProgress)]
    #[case(TaskStatus::Done)]
    fn test_cross_column_changes_exactly_one_status(#[case] status: TaskStatus) {
        let seq = abc();
        let target = DropTarget::ColumnEnd { status };

        let next = reorder(&seq, &seq[0].id, &target, status).unwrap();

        let changed = next
            .iter()
            .filter(|t| seq.iter().any(|o| o.id == t.id && o.status != t.status))
            .count();
        assert_eq!(changed, 1);
    }

    #[test]
    fn test_unknown_source_is_not_found() {
        let seq = abc();
        let stranger = TaskId::new();
        let err = reorder(&seq, &stranger, &before(&seq[0]), TaskStatus::Todo).unwrap_err();
        assert!(matches!(err, Error::TaskNotFound(_)));
    }

    #[test]
    fn test_unknown_anchor_is_not_found() {
        let seq = abc();
        let target = DropTarget::BeforeTask {
            task_id: TaskId::new(),
            status: TaskStatus::Todo,
        };
        let err = reorder(&seq, &seq[0].id, &target, TaskStatus::Todo).unwrap_err();
        assert!(matches!(err, Error::TaskNotFound(_)));
    }

    #[test]
    fn test_status_mismatch_is_rejected() {
        let seq = abc();
        let err = reorder(&seq, &seq[0].id, &before(&seq[2]), TaskStatus::Todo).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_reorder_does_not_touch_input() {
        let seq = abc();
        let copy = seq.clone();
        let _ = reorder(&seq, &seq[0].id, &before(&seq[2]), TaskStatus::Done).unwrap();
        assert_eq!(seq, copy);
    }
}
