//! Drop-target resolution
//!
//! Picks the single best place for the dragged card using corner-distance
//! collision: for every candidate (each card slot, and each column that has
//! no cards) the smallest distance between any corner of the dragged
//! rectangle and any corner of the candidate is computed, and the candidate
//! with the globally smallest value wins. Ties go to the earliest candidate
//! in traversal order (columns left to right, slots top to bottom).

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::geometry::{Layout, Rect};
use crate::task::{TaskId, TaskStatus};

/// Where a dragged task would land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DropTarget {
    /// Immediately before `task_id`, which lives in column `status`
    #[serde(rename_all = "camelCase")]
    BeforeTask { task_id: TaskId, status: TaskStatus },
    /// After the last task of a column
    ColumnEnd { status: TaskStatus },
}

impl DropTarget {
    /// Column the task would end up in
    pub fn status(&self) -> TaskStatus {
        match self {
            Self::BeforeTask { status, .. } | Self::ColumnEnd { status } => *status,
        }
    }

    /// The sibling the task would be placed in front of
    pub fn anchor(&self) -> Option<&TaskId> {
        match self {
            Self::BeforeTask { task_id, .. } => Some(task_id),
            Self::ColumnEnd { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Candidate {
    Slot { column: usize, slot: usize },
    EmptyColumn { column: usize },
}

/// Corner-distance drop-target resolver
#[derive(Debug, Clone, Copy)]
pub struct DropTargetResolver {
    interaction_range: f64,
}

impl DropTargetResolver {
    /// `interaction_range` is the largest corner distance, in pixels, at
    /// which a candidate still counts as reachable
    pub fn new(interaction_range: f64) -> Self {
        Self { interaction_range }
    }

    pub fn interaction_range(&self) -> f64 {
        self.interaction_range
    }

    /// Resolve the drop target for `source` dragged to `dragged`.
    ///
    /// Returns `None` when no candidate is within range.
    pub fn resolve(&self, source: &TaskId, dragged: &Rect, layout: &Layout) -> Option<DropTarget> {
        let mut best: Option<(Candidate, f64)> = None;

        for (candidate, rect) in candidates(layout) {
            let distance = dragged.min_corner_distance(&rect);
            if !distance.is_finite() || distance > self.interaction_range {
                continue;
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((candidate, distance));
            }
        }

        let (candidate, distance) = best?;
        let target = placement(source, dragged, layout, candidate);
        trace!(?target, distance, "Resolved drop target");
        Some(target)
    }
}

fn candidates(layout: &Layout) -> impl Iterator<Item = (Candidate, Rect)> + '_ {
    layout
        .columns
        .iter()
        .enumerate()
        .flat_map(|(column, col)| {
            let slots = col
                .slots
                .iter()
                .enumerate()
                .map(move |(slot, s)| (Candidate::Slot { column, slot }, s.rect));
            let empty = col
                .slots
                .is_empty()
                .then_some((Candidate::EmptyColumn { column }, col.rect));
            slots.chain(empty)
        })
}

/// Turn the winning candidate into a target. A slot hit lands before that
/// card while the dragged centre is at or above the card's centre, and
/// after it otherwise.
fn placement(source: &TaskId, dragged: &Rect, layout: &Layout, candidate: Candidate) -> DropTarget {
    match candidate {
        Candidate::EmptyColumn { column } => DropTarget::ColumnEnd {
            status: layout.columns[column].status,
        },
        Candidate::Slot { column, slot } => {
            let col = &layout.columns[column];
            let hit = &col.slots[slot];
            if hit.task_id == *source || dragged.center().y <= hit.rect.center().y {
                return DropTarget::BeforeTask {
                    task_id: hit.task_id,
                    status: col.status,
                };
            }
            // Skip the source's own slot so "after X" never anchors on itself
            match col.slots[slot + 1..].iter().find(|s| s.task_id != *source) {
                Some(next) => DropTarget::BeforeTask {
                    task_id: next.task_id,
                    status: col.status,
                },
                None => DropTarget::ColumnEnd { status: col.status },
            }
        }
    }
}
