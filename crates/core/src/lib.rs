//! Core library for the kanban board
//!
//! This crate contains the drag-and-drop core of the board:
//! - Task model and the ordered task store
//! - Derived column views and search filtering
//! - Drop-target resolution, reordering and the drag session state machine

pub mod board;
pub mod dnd;
pub mod error;
pub mod kanban;
pub mod task;

pub use board::Board;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
