//! HTTP router: REST endpoints under `/api` plus the browser client at `/`.

mod applications;
mod customers;
mod extract;
mod notes;
pub mod wire;

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{Html, Response};
use axum::routing::get;
use axum::{Json, Router};
use cats_core::{vocabulary, Vocabulary};
use log::{info, warn};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::state::Database;

pub type AppState = Database;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/vocabulary", get(get_vocabulary))
        .merge(customers::routes())
        .merge(applications::routes())
        .merge(notes::routes());

    Router::new()
        .route("/", get(index_page))
        .nest("/api", api)
        .with_state(state)
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "message": "CATS API is running" }))
}

async fn get_vocabulary() -> Json<Vocabulary> {
    Json(vocabulary())
}

async fn index_page() -> Html<&'static str> {
    Html(include_str!("../web/index.html"))
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    let http_status = response.status();
    let duration_ms = started_at.elapsed().as_millis();
    if http_status.is_server_error() {
        warn!(
            "event=http_request module=api status=error method={} path={} http_status={} duration_ms={}",
            method,
            path,
            http_status.as_u16(),
            duration_ms
        );
    } else {
        info!(
            "event=http_request module=api status=ok method={} path={} http_status={} duration_ms={}",
            method,
            path,
            http_status.as_u16(),
            duration_ms
        );
    }
    response
}
