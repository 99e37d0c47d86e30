//! In-memory implementation of the remote resource API.
//!
//! Serves `/api/expenses`, `/api/groups` and `/api/user-profiles` with the
//! same verbs and validation rules as the production backend. State lives only
//! in process memory.

pub mod resources;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", routes::api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve on a background task. Returns the bound address,
/// which differs from `addr` when port 0 was requested.
pub async fn spawn_server(addr: SocketAddr, state: AppState) -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    let local = listener.local_addr().context("read bound address")?;
    info!(addr = %local, "listening");
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app(state)).await {
            tracing::warn!(error = %err, "server stopped");
        }
    });
    Ok(local)
}
