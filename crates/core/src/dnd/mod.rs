//! Drag and drop
//!
//! Drop-target resolution, the reorder engine and the drag session state
//! machine that ties them to the task store.

mod controller;
mod geometry;
mod keyboard;
mod reorder;
mod resolver;
mod sensor;
mod session;

pub use controller::{CancelReason, DragController, DragUpdate, InteractionGeometry};
pub use geometry::{ColumnLayout, Layout, Point, Rect, SlotLayout};
pub use keyboard::{keyboard_target, Direction, KeyAction, KeyboardCode};
pub use reorder::reorder;
pub use resolver::{DropTarget, DropTargetResolver};
pub use sensor::PointerSensor;
pub use session::{DragPhase, DragSession, InputMode};

/// Largest corner distance, in pixels, at which a drop target is reachable
pub const DEFAULT_INTERACTION_RANGE: f64 = 160.0;

/// Pointer travel, in pixels, before a press turns into a drag
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 5.0;

/// Tuning for pointer interactions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DndConfig {
    pub interaction_range: f64,
    pub activation_distance: f64,
}

impl Default for DndConfig {
    fn default() -> Self {
        Self {
            interaction_range: DEFAULT_INTERACTION_RANGE,
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
        }
    }
}
