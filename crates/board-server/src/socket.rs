//! Socket.IO event handlers for real-time communication
//!
//! The browser view forwards its raw drag input here; the hosted board runs
//! the drag state machine and every client receives the resulting preview
//! and committed snapshots.

use serde::{Deserialize, Serialize};
use socketioxide::extract::{Data, SocketRef, State};
use socketioxide::{SocketIo, TransportType};
use tracing::{debug, info, warn};

use board_core::dnd::{DragUpdate, InteractionGeometry, KeyboardCode, Point};
use board_core::kanban::BoardSnapshot;
use board_core::task::{TaskDraft, TaskId};
use board_core::{Board, Result};

use crate::state::{AppState, BoardState};

// ============ Event Payloads ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStartPayload {
    pub task_id: TaskId,
    pub geometry: InteractionGeometry,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragKeyPayload {
    /// Card with keyboard focus, needed to pick up
    #[serde(default)]
    pub task_id: Option<TaskId>,
    pub code: KeyboardCode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerDownPayload {
    pub task_id: TaskId,
    pub position: Point,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerMovePayload {
    pub position: Point,
    pub geometry: InteractionGeometry,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub message: String,
}

// ============ Event Handlers ============

/// Handle new socket connection
pub async fn on_connect(socket: SocketRef) {
    info!("Client connected: {}", socket.id);

    socket.on(
        "kanban:request-sync",
        |socket: SocketRef, State(state): State<AppState>| async move {
            handle_request_sync(socket, state).await;
        },
    );

    socket.on(
        "kanban:create",
        |socket: SocketRef, State(state): State<AppState>, Data(data): Data<TaskDraft>| async move {
            handle_create_task(socket, state, data).await;
        },
    );

    socket.on(
        "drag:start",
        |socket: SocketRef, State(state): State<AppState>, Data(data): Data<DragStartPayload>| async move {
            handle_drag(&socket, &state, |board| {
                board.on_interaction_start(data.task_id, &data.geometry)
            })
            .await;
        },
    );

    socket.on(
        "drag:move",
        |socket: SocketRef, State(state): State<AppState>, Data(data): Data<InteractionGeometry>| async move {
            handle_drag(&socket, &state, |board| board.on_interaction_move(&data)).await;
        },
    );

    socket.on(
        "drag:key",
        |socket: SocketRef, State(state): State<AppState>, Data(data): Data<DragKeyPayload>| async move {
            handle_drag(&socket, &state, |board| board.on_key(data.task_id, data.code)).await;
        },
    );

    socket.on(
        "drag:end",
        |socket: SocketRef, State(state): State<AppState>| async move {
            handle_drag(&socket, &state, Board::on_interaction_end).await;
        },
    );

    socket.on(
        "drag:cancel",
        |socket: SocketRef, State(state): State<AppState>| async move {
            handle_drag(&socket, &state, |board| Ok(board.on_interaction_cancel())).await;
        },
    );

    socket.on(
        "pointer:down",
        |socket: SocketRef, State(state): State<AppState>, Data(data): Data<PointerDownPayload>| async move {
            handle_drag(&socket, &state, |board| {
                board.on_pointer_down(data.task_id, data.position);
                Ok(DragUpdate::Ignored)
            })
            .await;
        },
    );

    socket.on(
        "pointer:move",
        |socket: SocketRef, State(state): State<AppState>, Data(data): Data<PointerMovePayload>| async move {
            handle_drag(&socket, &state, |board| {
                board.on_pointer_move(data.position, &data.geometry)
            })
            .await;
        },
    );

    socket.on(
        "pointer:up",
        |socket: SocketRef, State(state): State<AppState>| async move {
            handle_drag(&socket, &state, Board::on_pointer_up).await;
        },
    );

    socket.on_disconnect(
        |socket: SocketRef, State(state): State<AppState>| async move {
            info!("Client disconnected: {}", socket.id);
            handle_disconnect(&socket, &state).await;
        },
    );
}

async fn handle_request_sync(socket: SocketRef, state: AppState) {
    info!("Client {} requested sync", socket.id);
    let snapshot = state.board().read().await.snapshot();
    if let Err(e) = socket.emit("kanban:sync", &snapshot) {
        warn!("Failed to emit sync: {}", e);
    }
}

async fn handle_create_task(socket: SocketRef, state: AppState, data: TaskDraft) {
    info!("Creating task: {}", data.title);

    let result = {
        let mut board = state.board().write().await;
        board
            .board
            .create_task(data)
            .map(|_| board.snapshot())
    };

    match result {
        Ok(snapshot) => broadcast(&socket, "kanban:sync", &snapshot),
        Err(e) => {
            warn!("Failed to create task: {}", e);
            emit_error(&socket, e.to_string());
        }
    }
}

/// What one drag event from a socket amounted to
#[derive(Debug)]
enum DragOutcome {
    Applied(DragUpdate, BoardSnapshot),
    /// Another socket holds the drag or the pending pointer press
    NotOwner(String),
    Failed(board_core::Error),
}

/// Run one drag operation for `socket` and fan out the outcome.
///
/// Only the socket that opened the current drag, or pressed the pointer
/// that may open one, may drive it.
async fn handle_drag<F>(socket: &SocketRef, state: &AppState, op: F)
where
    F: FnOnce(&mut Board) -> Result<DragUpdate>,
{
    let sid = socket.id.to_string();

    let outcome = {
        let mut guard = state.board().write().await;
        drive_drag(&mut guard, &sid, op)
    };

    match outcome {
        DragOutcome::Applied(update, snapshot) => publish(socket, &update, &snapshot),
        DragOutcome::NotOwner(owner) => {
            debug!("Client {} tried to drive a drag owned by {}", sid, owner);
            emit_error(socket, "Another client is dragging".to_string());
        }
        DragOutcome::Failed(e) => {
            warn!("Drag operation failed for {}: {}", sid, e);
            emit_error(socket, e.to_string());
        }
    }
}

fn drive_drag<F>(guard: &mut BoardState, sid: &str, op: F) -> DragOutcome
where
    F: FnOnce(&mut Board) -> Result<DragUpdate>,
{
    if let Some(owner) = guard.drag_owner.as_deref() {
        if owner != sid {
            return DragOutcome::NotOwner(owner.to_string());
        }
    }

    let result = op(&mut guard.board);
    sync_owner(guard, sid);
    match result {
        Ok(update) => DragOutcome::Applied(update, guard.snapshot()),
        Err(e) => DragOutcome::Failed(e),
    }
}

/// A client that drops its connection mid-drag cancels it
async fn handle_disconnect(socket: &SocketRef, state: &AppState) {
    let sid = socket.id.to_string();
    let snapshot = {
        let mut guard = state.board().write().await;
        release_socket(&mut guard, &sid)
    };
    if let Some(snapshot) = snapshot {
        let _ = socket.broadcast().emit("kanban:sync", &snapshot);
    }
}

/// Cancel whatever `sid` owns. Returns the snapshot to broadcast, or `None`
/// when the socket owned nothing.
fn release_socket(guard: &mut BoardState, sid: &str) -> Option<BoardSnapshot> {
    if guard.drag_owner.as_deref() != Some(sid) {
        return None;
    }
    guard.board.on_interaction_cancel();
    guard.board.on_pointer_cancel();
    guard.drag_owner = None;
    Some(guard.snapshot())
}

/// Keep the recorded owner in step with whether a session or a pending
/// pointer press is open
fn sync_owner(guard: &mut BoardState, sid: &str) {
    if guard.board.phase().is_active() || guard.board.pointer_pending() {
        if guard.drag_owner.is_none() {
            guard.drag_owner = Some(sid.to_string());
        }
    } else {
        guard.drag_owner = None;
    }
}

fn publish(socket: &SocketRef, update: &DragUpdate, snapshot: &BoardSnapshot) {
    match update {
        DragUpdate::Started { .. } | DragUpdate::Preview { .. } => {
            broadcast(socket, "drag:preview", snapshot)
        }
        DragUpdate::Committed { .. } | DragUpdate::Cancelled { .. } => {
            broadcast(socket, "kanban:sync", snapshot)
        }
        DragUpdate::Ignored | DragUpdate::Unchanged => {}
    }
}

/// Emit to the sender and every other client
fn broadcast(socket: &SocketRef, event: &'static str, snapshot: &BoardSnapshot) {
    let _ = socket.emit(event, snapshot);
    let _ = socket.broadcast().emit(event, snapshot);
}

fn emit_error(socket: &SocketRef, message: String) {
    let _ = socket.emit("kanban:error", &ErrorPayload { message });
}

/// Create and configure Socket.IO layer
pub fn create_socket_layer(state: AppState) -> (socketioxide::layer::SocketIoLayer, SocketIo) {
    let (layer, io) = SocketIo::builder()
        .with_state(state)
        // Only allow WebSocket transport to avoid CORS issues with polling
        .transports([TransportType::Websocket])
        .build_layer();

    io.ns("/", on_connect);

    (layer, io)
}
