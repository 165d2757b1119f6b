//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    task_count: usize,
    dragging: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let board = state.board().read().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        task_count: board.board.committed_order().len(),
        dragging: board.board.phase().is_active(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
