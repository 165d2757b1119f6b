//! Application state

use std::sync::Arc;

use socketioxide::SocketIo;
use tokio::sync::RwLock;
use tracing::warn;

use board_core::kanban::BoardSnapshot;
use board_core::task::TaskFilter;
use board_core::Board;

/// The hosted board plus which socket owns the live drag, if any
#[derive(Debug)]
pub struct BoardState {
    pub board: Board,
    pub drag_owner: Option<String>,
}

impl BoardState {
    /// Unfiltered snapshot, as broadcast to every client
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot(&TaskFilter::default())
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    board: RwLock<BoardState>,
    socket_io: RwLock<Option<SocketIo>>,
}

impl AppState {
    pub fn new(board: Board) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                board: RwLock::new(BoardState {
                    board,
                    drag_owner: None,
                }),
                socket_io: RwLock::new(None),
            }),
        }
    }

    pub fn board(&self) -> &RwLock<BoardState> {
        &self.inner.board
    }

    pub async fn set_socket_io(&self, io: SocketIo) {
        *self.inner.socket_io.write().await = Some(io);
    }

    pub async fn get_socket_io(&self) -> Option<SocketIo> {
        self.inner.socket_io.read().await.clone()
    }

    /// Push the current board to every connected client
    pub async fn broadcast_sync(&self) {
        let Some(io) = self.get_socket_io().await else {
            return;
        };
        let snapshot = self.inner.board.read().await.snapshot();
        if let Err(e) = io.emit("kanban:sync", &snapshot) {
            warn!("Failed to broadcast sync: {}", e);
        }
    }
}
