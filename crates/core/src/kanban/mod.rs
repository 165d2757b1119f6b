//! Kanban board views
//!
//! Derived, read-only column views over the task sequence for the
//! three-column layout (Todo, In Progress, Done) used by the frontend.

mod model;

pub use model::*;
