//! Task module
//!
//! This module contains the task model, the ordered task store and the
//! search filter applied over it.

mod filter;
mod model;
mod store;

pub use filter::TaskFilter;
pub use model::*;
pub use store::{filter_by_status, verify_permutation, TaskStore};
