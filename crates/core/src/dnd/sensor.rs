//! Pointer activation
//!
//! A press on a card only becomes a drag once the pointer has travelled a
//! minimum distance, so plain clicks never open a drag session.

use super::geometry::Point;
use crate::task::TaskId;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingPress {
    task_id: TaskId,
    origin: Point,
}

/// Tracks a pressed-but-not-yet-dragging pointer
#[derive(Debug, Clone)]
pub struct PointerSensor {
    activation_distance: f64,
    pending: Option<PendingPress>,
}

impl PointerSensor {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            activation_distance,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Pointer went down on a card. A second press replaces the first.
    pub fn press(&mut self, task_id: TaskId, origin: Point) {
        self.pending = Some(PendingPress { task_id, origin });
    }

    /// Pointer moved. Returns the pressed task once the activation distance
    /// is reached; the press is consumed at that point.
    pub fn moved(&mut self, position: Point) -> Option<TaskId> {
        let pending = self.pending?;
        if pending.origin.distance(&position) < self.activation_distance {
            return None;
        }
        self.pending = None;
        Some(pending.task_id)
    }

    /// Pointer released before activation: the press was a click
    pub fn release(&mut self) -> Option<TaskId> {
        self.pending.take().map(|p| p.task_id)
    }
}
