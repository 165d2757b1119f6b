//! Keyboard operation of the board
//!
//! Space or Enter picks a card up and drops it, Escape cancels, and the
//! arrow keys step the card through the board by logical position rather
//! than by pixels.

use serde::{Deserialize, Serialize};

use super::resolver::DropTarget;
use crate::task::{Task, TaskId, TaskStatus};

/// Keys the board reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardCode {
    Space,
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a key press means to the drag controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Pick up when idle, drop when dragging
    Toggle,
    Cancel,
    Move(Direction),
}

impl KeyboardCode {
    pub fn action(self) -> KeyAction {
        match self {
            Self::Space | Self::Enter => KeyAction::Toggle,
            Self::Escape => KeyAction::Cancel,
            Self::ArrowUp => KeyAction::Move(Direction::Up),
            Self::ArrowDown => KeyAction::Move(Direction::Down),
            Self::ArrowLeft => KeyAction::Move(Direction::Left),
            Self::ArrowRight => KeyAction::Move(Direction::Right),
        }
    }
}

/// Target one keyboard step away from where `source` currently sits in
/// `sequence` (the preview order while one is shown).
///
/// Up and down move one slot within the column. Left and right move to the
/// neighbouring column at the same row, or its end when that column is
/// shorter. At the board's edges the card stays where it is.
pub fn keyboard_target(
    sequence: &[Task],
    source: &TaskId,
    direction: Option<Direction>,
) -> Option<DropTarget> {
    let current = sequence.iter().find(|t| t.id == *source)?;
    let status = current.status;
    let column = column_ids(sequence, status, None);
    let row = column.iter().position(|id| id == source)?;

    let stay = DropTarget::BeforeTask {
        task_id: *source,
        status,
    };

    let target = match direction {
        None => stay,
        Some(Direction::Up) => match row.checked_sub(1) {
            Some(above) => DropTarget::BeforeTask {
                task_id: column[above],
                status,
            },
            None => stay,
        },
        Some(Direction::Down) => {
            if row + 1 >= column.len() {
                stay
            } else {
                match column.get(row + 2) {
                    Some(after_next) => DropTarget::BeforeTask {
                        task_id: *after_next,
                        status,
                    },
                    None => DropTarget::ColumnEnd { status },
                }
            }
        }
        Some(Direction::Left) | Some(Direction::Right) => {
            let Some(neighbour) = neighbour_column(status, direction) else {
                return Some(stay);
            };
            let others = column_ids(sequence, neighbour, Some(source));
            match others.get(row) {
                Some(task_id) => DropTarget::BeforeTask {
                    task_id: *task_id,
                    status: neighbour,
                },
                None => DropTarget::ColumnEnd { status: neighbour },
            }
        }
    };
    Some(target)
}

fn column_ids(sequence: &[Task], status: TaskStatus, exclude: Option<&TaskId>) -> Vec<TaskId> {
    sequence
        .iter()
        .filter(|t| t.status == status && Some(&t.id) != exclude)
        .map(|t| t.id)
        .collect()
}

fn neighbour_column(status: TaskStatus, direction: Option<Direction>) -> Option<TaskStatus> {
    let index = status.column_index();
    let next = match direction? {
        Direction::Left => index.checked_sub(1)?,
        Direction::Right => index + 1,
        Direction::Up | Direction::Down => return None,
    };
    TaskStatus::ALL.get(next).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dnd::reorder::reorder;
    use crate::task::TaskDraft;

    fn task(title: &str, status: TaskStatus) -> Task {
        Task::from_draft(TaskDraft::new(title).with_status(status)).unwrap()
    }

    fn board() -> Vec<Task> {
        vec![
            task("A", TaskStatus::Todo),
            task("B", TaskStatus::Todo),
            task("C", TaskStatus::Todo),
            task("D", TaskStatus::InProgress),
        ]
    }

    fn apply(seq: &[Task], source: &TaskId, direction: Direction) -> Vec<Task> {
        let target = keyboard_target(seq, source, Some(direction)).unwrap();
        reorder(seq, source, &target, target.status()).unwrap()
    }

    fn names(seq: &[Task], status: TaskStatus) -> Vec<&str> {
        seq.iter()
            .filter(|t| t.status == status)
            .map(|t| t.title.as_str())
            .collect()
    }

    #[test]
    fn test_key_actions() {
        assert_eq!(KeyboardCode::Space.action(), KeyAction::Toggle);
        assert_eq!(KeyboardCode::Enter.action(), KeyAction::Toggle);
        assert_eq!(KeyboardCode::Escape.action(), KeyAction::Cancel);
        assert_eq!(
            KeyboardCode::ArrowLeft.action(),
            KeyAction::Move(Direction::Left)
        );
    }

    #[test]
    fn test_no_step_stays_in_place() {
        let seq = board();
        let target = keyboard_target(&seq, &seq[1].id, None).unwrap();
        assert_eq!(target.anchor(), Some(&seq[1].id));
    }

    #[test]
    fn test_down_moves_one_slot() {
        let seq = board();
        let next = apply(&seq, &seq[0].id, Direction::Down);
        assert_eq!(names(&next, TaskStatus::Todo), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_down_into_last_slot() {
        let seq = board();
        let next = apply(&seq, &seq[1].id, Direction::Down);
        assert_eq!(names(&next, TaskStatus::Todo), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_down_at_bottom_stays() {
        let seq = board();
        let next = apply(&seq, &seq[2].id, Direction::Down);
        assert_eq!(next, seq);
    }

    #[test]
    fn test_up_moves_one_slot() {
        let seq = board();
        let next = apply(&seq, &seq[2].id, Direction::Up);
        assert_eq!(names(&next, TaskStatus::Todo), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_up_at_top_stays() {
        let seq = board();
        assert_eq!(apply(&seq, &seq[0].id, Direction::Up), seq);
    }

    #[test]
    fn test_right_keeps_row() {
        let seq = board();
        let next = apply(&seq, &seq[0].id, Direction::Right);
        assert_eq!(names(&next, TaskStatus::InProgress), vec!["A", "D"]);
    }

    #[test]
    fn test_right_onto_shorter_column_goes_to_end() {
        let seq = board();
        let next = apply(&seq, &seq[2].id, Direction::Right);
        assert_eq!(names(&next, TaskStatus::InProgress), vec!["D", "C"]);
    }

    #[test]
    fn test_right_into_empty_column() {
        let seq = board();
        let next = apply(&seq, &seq[3].id, Direction::Right);
        assert_eq!(names(&next, TaskStatus::Done), vec!["D"]);
    }

    #[test]
    fn test_left_at_edge_stays() {
        let seq = board();
        assert_eq!(apply(&seq, &seq[0].id, Direction::Left), seq);
    }

    #[test]
    fn test_unknown_source_has_no_target() {
        assert_eq!(keyboard_target(&board(), &TaskId::new(), None), None);
    }
}
