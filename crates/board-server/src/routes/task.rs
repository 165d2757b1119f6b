//! Task API endpoints
//!
//! Read-only views over the committed order plus task creation. Moves only
//! happen through drag sessions on the socket.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::warn;

use board_core::kanban::BoardSnapshot;
use board_core::task::{Task, TaskDraft, TaskFilter, TaskId};
use board_core::Error;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(e: Error) -> ApiError {
    let status = match &e {
        Error::Validation(_) | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::TaskNotFound(_) => StatusCode::NOT_FOUND,
        Error::Invariant(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// GET /api/tasks?q=&status= - Committed tasks matching the search box
async fn list_tasks(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> Json<Vec<Task>> {
    let board = state.board().read().await;
    Json(board.board.tasks(&filter))
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(draft): Json<TaskDraft>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let created = {
        let mut board = state.board().write().await;
        board.board.create_task(draft).map_err(|e| {
            warn!("Failed to create task: {}", e);
            api_error(e)
        })?
    };

    state.broadcast_sync().await;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/tasks/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id: TaskId = id.parse().map_err(api_error)?;
    let board = state.board().read().await;
    board
        .board
        .store()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(Error::TaskNotFound(id.to_string())))
}

/// GET /api/board?q= - Columns and live drag state
async fn get_board(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> Json<BoardSnapshot> {
    let board = state.board().read().await;
    Json(board.board.snapshot(&filter))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", get(get_task))
        .route("/api/board", get(get_board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use board_core::dnd::DndConfig;
    use board_core::Board;
    use tower::ServiceExt;

    fn app() -> (Router, AppState) {
        let tasks = crate::seed::demo_tasks().unwrap();
        let state = AppState::new(Board::with_tasks(tasks, DndConfig::default()).unwrap());
        (router().with_state(state.clone()), state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_tasks() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::get("/api/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_tasks_with_search() {
        let (app, _) = app();
        let response = app
            .oneshot(
                Request::get("/api/tasks?q=graphql")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        let tasks = json.as_array().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["title"], "API Integration");
    }

    #[tokio::test]
    async fn test_list_tasks_by_status() {
        let (app, _) = app();
        let response = app
            .oneshot(
                Request::get("/api/tasks?status=done")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json[0]["title"], "User Research");
    }

    #[tokio::test]
    async fn test_create_task() {
        let (app, state) = app();
        let response = app
            .oneshot(
                Request::post("/api/tasks")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"title":"Write docs","priority":"high","status":"in-progress"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["priority"], "high");

        let board = state.board().read().await;
        assert_eq!(board.board.committed_order().len(), 4);
        assert_eq!(board.board.committed_order()[3].title, "Write docs");
    }

    #[tokio::test]
    async fn test_create_task_with_empty_title_is_rejected() {
        let (app, state) = app();
        let response = app
            .oneshot(
                Request::post("/api/tasks")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title":""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.board().read().await.board.committed_order().len(), 3);
    }

    #[tokio::test]
    async fn test_get_unknown_task() {
        let (app, _) = app();
        let uri = format!("/api/tasks/{}", TaskId::new());
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_task_with_malformed_id() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::get("/api/tasks/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_board() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::get("/api/board").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = body_json(response).await;
        let columns = json["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[1]["title"], "In Progress");
        assert!(json.get("activeTaskId").is_none());
    }
}
