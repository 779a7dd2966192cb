//! Single-application endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{post, put};
use axum::{Json, Router};
use cats_core::{
    ApplicationDraft, ApplicationId, ApplicationService, CustomerId, SqliteApplicationRepository,
};
use serde_json::{json, Value};

use super::extract::{JsonBody, PathParam};
use super::wire::{ApplicationBody, ApplicationView};
use super::AppState;
use crate::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers/{id}/applications", post(create_application))
        .route(
            "/applications/{id}",
            put(update_application).delete(delete_application),
        )
}

async fn create_application(
    State(db): State<AppState>,
    PathParam(customer_id): PathParam<CustomerId>,
    JsonBody(body): JsonBody<ApplicationBody>,
) -> Result<(StatusCode, Json<ApplicationView>), ApiError> {
    let draft = ApplicationDraft::from(body);
    let application = db
        .run(move |conn| {
            let mut service = ApplicationService::new(SqliteApplicationRepository::new(conn));
            Ok(service.create_application(customer_id, draft)?)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(application.into())))
}

async fn update_application(
    State(db): State<AppState>,
    PathParam(id): PathParam<ApplicationId>,
    JsonBody(body): JsonBody<ApplicationBody>,
) -> Result<Json<ApplicationView>, ApiError> {
    let draft = ApplicationDraft::from(body);
    let application = db
        .run(move |conn| {
            let mut service = ApplicationService::new(SqliteApplicationRepository::new(conn));
            Ok(service.update_application(id, draft)?)
        })
        .await?;
    Ok(Json(application.into()))
}

async fn delete_application(
    State(db): State<AppState>,
    PathParam(id): PathParam<ApplicationId>,
) -> Result<Json<Value>, ApiError> {
    db.run(move |conn| {
        let service = ApplicationService::new(SqliteApplicationRepository::new(conn));
        Ok(service.delete_application(id)?)
    })
    .await?;
    Ok(Json(json!({ "message": "Application deleted successfully" })))
}
