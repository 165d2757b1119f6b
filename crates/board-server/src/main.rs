//! Board server
//!
//! Hosts one in-memory kanban board. It provides a REST API and a
//! Socket.IO endpoint that runs drag sessions for the browser view.

mod config;
mod routes;
mod seed;
mod socket;
mod state;

use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use board_core::Board;

use crate::config::ServerConfig;
use crate::socket::create_socket_layer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "board_server=debug,board_core=debug,tower_http=debug,socketioxide=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!("Starting with {:?}", config);

    let tasks = if config.seed_demo {
        seed::demo_tasks()?
    } else {
        Vec::new()
    };
    let board = Board::with_tasks(tasks, config.dnd)?;
    let app_state = AppState::new(board);

    let (socket_layer, io) = create_socket_layer(app_state.clone());
    app_state.set_socket_io(io).await;

    // REST API server
    let rest_app = Router::new()
        .merge(routes::health::router())
        .merge(routes::task::router())
        .with_state(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Socket.IO server
    // Layers are applied bottom-to-top, so CorsLayer is added last to be applied first
    let socket_app = Router::new()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(socket_layer);

    let rest_addr = SocketAddr::from(([0, 0, 0, 0], config.rest_port));
    let socket_addr = SocketAddr::from(([0, 0, 0, 0], config.socket_port));

    let rest_listener = tokio::net::TcpListener::bind(rest_addr)
        .await
        .with_context(|| format!("Failed to bind REST API on {}", rest_addr))?;
    let socket_listener = tokio::net::TcpListener::bind(socket_addr)
        .await
        .with_context(|| format!("Failed to bind Socket.IO on {}", socket_addr))?;

    tracing::info!("REST API listening on {}", rest_addr);
    tracing::info!("Socket.IO listening on {}", socket_addr);

    let rest_handle = tokio::spawn(async move { axum::serve(rest_listener, rest_app).await });
    let socket_handle = tokio::spawn(async move { axum::serve(socket_listener, socket_app).await });

    // Wait for both
    let (rest, socket) = tokio::try_join!(rest_handle, socket_handle)?;
    rest.context("REST API server failed")?;
    socket.context("Socket.IO server failed")?;
    Ok(())
}
