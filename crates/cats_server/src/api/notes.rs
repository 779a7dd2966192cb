//! Meeting note endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, post};
use axum::{Json, Router};
use cats_core::{CustomerId, NoteDraft, NoteId, NoteService, SqliteMeetingNoteRepository};
use serde_json::{json, Value};

use super::extract::{JsonBody, PathParam};
use super::wire::{NoteBody, NoteView};
use super::AppState;
use crate::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers/{id}/notes", post(add_note))
        .route("/notes/{id}", delete(delete_note))
}

async fn add_note(
    State(db): State<AppState>,
    PathParam(customer_id): PathParam<CustomerId>,
    JsonBody(body): JsonBody<NoteBody>,
) -> Result<(StatusCode, Json<NoteView>), ApiError> {
    let draft = NoteDraft::from(body);
    let note = db
        .run(move |conn| {
            let mut service = NoteService::new(SqliteMeetingNoteRepository::new(conn));
            Ok(service.add_note(customer_id, draft)?)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(note.into())))
}

async fn delete_note(
    State(db): State<AppState>,
    PathParam(id): PathParam<NoteId>,
) -> Result<Json<Value>, ApiError> {
    db.run(move |conn| {
        let service = NoteService::new(SqliteMeetingNoteRepository::new(conn));
        Ok(service.delete_note(id)?)
    })
    .await?;
    Ok(Json(json!({ "message": "Note deleted successfully" })))
}
