mod youtube;

pub use youtube::*;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::models::*;

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// ============================================================
// Notes
// ============================================================

pub async fn list_notes(
    State(state): State<AppState>,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Note>>> {
    let Query(query) = query?;
    let video_id = query.validate()?;

    state
        .db
        .get_notes_by_video(&video_id)
        .map(Json)
        .map_err(ApiError::internal("Failed to fetch notes"))
}

pub async fn create_note(
    State(state): State<AppState>,
    input: Result<Json<CreateNoteInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let Json(input) = input?;
    let new_note = input.validate()?;

    // `note_added` is logged by the client through POST /events.
    state
        .db
        .create_note(new_note)
        .map(|note| (StatusCode::CREATED, Json(note)))
        .map_err(ApiError::internal("Failed to create note"))
}

// ============================================================
// Event Log
// ============================================================

pub async fn append_event(
    State(state): State<AppState>,
    input: Result<Json<AppendEventInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EventLogEntry>)> {
    let Json(input) = input?;
    let entry = input.validate()?;

    state
        .db
        .append_event(entry)
        .map(|e| (StatusCode::CREATED, Json(e)))
        .map_err(ApiError::internal("Failed to log event"))
}
