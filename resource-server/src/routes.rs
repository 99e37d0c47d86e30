//! HTTP route handlers for the resource API.

use std::collections::HashMap;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::resources::ApiError;
use crate::state::AppState;

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/{collection}", get(list_records).post(create_record))
        .route(
            "/{collection}/{id}",
            get(get_record)
                .put(update_record)
                .patch(partial_update_record)
                .delete(delete_record),
        )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Problem {
    title: String,
    error_key: &'static str,
    status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Problem {
            title: self.title,
            error_key: self.error_key,
            status: self.status,
        };
        (status, Json(body)).into_response()
    }
}

async fn health() -> &'static str {
    "ok"
}

/// GET /api/:collection - every record in id order. `sort` and `cacheBuster`
/// are accepted and ignored.
async fn list_records(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Value>>, ApiError> {
    debug!(collection, sort = ?params.get("sort"), "list records");
    state.store().list(&collection).map(Json)
}

/// GET /api/:collection/:id
async fn get_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, i64)>,
) -> Result<Json<Value>, ApiError> {
    state.store().get(&collection, id).map(Json)
}

/// POST /api/:collection - 201 with the created record.
async fn create_record(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let created = state.store().create(&collection, body)?;
    debug!(collection, id = ?created.get("id"), "record created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/:collection/:id
async fn update_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    state.store().replace(&collection, id, body).map(Json)
}

/// PATCH /api/:collection/:id - merges non-null attributes.
async fn partial_update_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    state.store().merge(&collection, id, body).map(Json)
}

/// DELETE /api/:collection/:id - 204.
async fn delete_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, i64)>,
) -> Result<StatusCode, ApiError> {
    state.store().delete(&collection, id)?;
    Ok(StatusCode::NO_CONTENT)
}
