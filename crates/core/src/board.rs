//! Board facade
//!
//! Owns the committed [`TaskStore`] and the [`DragController`] and exposes
//! the entry points a view calls: task creation, read-only views, and the
//! pointer and keyboard interaction events.

use tracing::{debug, warn};

use crate::dnd::{
    DndConfig, DragController, DragPhase, DragUpdate, DropTargetResolver, InputMode,
    InteractionGeometry, KeyAction, KeyboardCode, Point, PointerSensor,
};
use crate::kanban::BoardSnapshot;
use crate::task::{Task, TaskDraft, TaskFilter, TaskId, TaskStore};
use crate::Result;

/// One kanban board: committed tasks plus at most one live drag
#[derive(Debug, Clone)]
pub struct Board {
    store: TaskStore,
    controller: DragController,
    sensor: PointerSensor,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DndConfig::default())
    }
}

impl Board {
    /// Create an empty board
    pub fn new(config: DndConfig) -> Self {
        Self {
            store: TaskStore::new(),
            controller: DragController::new(DropTargetResolver::new(config.interaction_range)),
            sensor: PointerSensor::new(config.activation_distance),
        }
    }

    /// Create a board seeded with tasks, in order
    pub fn with_tasks(tasks: Vec<Task>, config: DndConfig) -> Result<Self> {
        let mut board = Self::new(config);
        board.store = TaskStore::with_tasks(tasks)?;
        Ok(board)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The authoritative order, for default rendering
    pub fn committed_order(&self) -> &[Task] {
        self.store.list()
    }

    /// Candidate order while a drag has a target
    pub fn preview_order(&self) -> Option<&[Task]> {
        self.controller.preview_order()
    }

    pub fn active_session_task_id(&self) -> Option<TaskId> {
        self.controller.active_task_id()
    }

    pub fn phase(&self) -> DragPhase {
        self.controller.phase()
    }

    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Whether a pointer press is waiting to become a drag
    pub fn pointer_pending(&self) -> bool {
        self.sensor.is_pending()
    }

    /// Create a task from a form draft. An open drag's preview is rebuilt
    /// so it includes the new task.
    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Task> {
        let task = self.store.create(draft)?;
        if let Err(e) = self.controller.refresh(&self.store) {
            warn!(task_id = %task.id, "Failed to refresh drag preview, cancelling drag: {}", e);
            self.controller.cancel();
        }
        Ok(task)
    }

    /// Committed tasks matching the search filter
    pub fn tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        filter.apply(self.store.list())
    }

    /// Committed board plus the live drag state, both filtered
    pub fn snapshot(&self, filter: &TaskFilter) -> BoardSnapshot {
        let snapshot = BoardSnapshot::new(self.tasks(filter));
        match self.active_session_task_id() {
            Some(task_id) => {
                let preview = self.preview_order().map(|order| filter.apply(order));
                snapshot.with_preview(task_id, preview)
            }
            None => snapshot,
        }
    }

    pub fn on_interaction_start(
        &mut self,
        task_id: TaskId,
        geometry: &InteractionGeometry,
    ) -> Result<DragUpdate> {
        self.controller.start(&self.store, task_id, geometry)
    }

    pub fn on_interaction_move(&mut self, geometry: &InteractionGeometry) -> Result<DragUpdate> {
        self.controller.update(&self.store, geometry)
    }

    pub fn on_interaction_end(&mut self) -> Result<DragUpdate> {
        self.controller.end(&mut self.store)
    }

    pub fn on_interaction_cancel(&mut self) -> DragUpdate {
        self.controller.cancel()
    }

    /// Keyboard entry point. `focused` is the card with keyboard focus.
    ///
    /// Escape cancels any drag; the other keys only drive keyboard drags.
    pub fn on_key(&mut self, focused: Option<TaskId>, code: KeyboardCode) -> Result<DragUpdate> {
        let mode = self.controller.session().map(|s| s.input_mode);
        match (code.action(), mode) {
            (KeyAction::Cancel, _) => Ok(self.on_interaction_cancel()),
            (KeyAction::Toggle, None) => match focused {
                Some(task_id) => self
                    .on_interaction_start(task_id, &InteractionGeometry::Keyboard { step: None }),
                None => Ok(DragUpdate::Ignored),
            },
            (KeyAction::Toggle, Some(InputMode::Keyboard)) => self.on_interaction_end(),
            (KeyAction::Move(direction), Some(InputMode::Keyboard)) => self
                .on_interaction_move(&InteractionGeometry::Keyboard {
                    step: Some(direction),
                }),
            _ => Ok(DragUpdate::Ignored),
        }
    }

    /// Pointer pressed on a card. The drag opens once the pointer has moved
    /// far enough.
    pub fn on_pointer_down(&mut self, task_id: TaskId, position: Point) {
        if self.phase().is_active() {
            return;
        }
        self.sensor.press(task_id, position);
    }

    pub fn on_pointer_move(
        &mut self,
        position: Point,
        geometry: &InteractionGeometry,
    ) -> Result<DragUpdate> {
        if self.phase().is_active() {
            return self.on_interaction_move(geometry);
        }
        match self.sensor.moved(position) {
            Some(task_id) => self.on_interaction_start(task_id, geometry),
            None => Ok(DragUpdate::Ignored),
        }
    }

    /// Drop any press that has not turned into a drag yet
    pub fn on_pointer_cancel(&mut self) {
        if let Some(task_id) = self.sensor.release() {
            debug!(task_id = %task_id, "Pending pointer press dropped");
        }
    }

    pub fn on_pointer_up(&mut self) -> Result<DragUpdate> {
        let mode = self.controller.session().map(|s| s.input_mode);
        match mode {
            Some(InputMode::Pointer) => self.on_interaction_end(),
            Some(InputMode::Keyboard) => Ok(DragUpdate::Ignored),
            None => {
                if let Some(task_id) = self.sensor.release() {
                    debug!(task_id = %task_id, "Pointer released before activation");
                }
                Ok(DragUpdate::Ignored)
            }
        }
    }
}
