//! Customer endpoints: list, search, detail, create, full replace, delete.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use cats_core::{CustomerDraft, CustomerId, CustomerService, SqliteCustomerRepository};
use serde_json::{json, Value};

use super::extract::{JsonBody, PathParam};
use super::wire::{CustomerBody, CustomerDetailView, CustomerView};
use super::AppState;
use crate::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/search/{query}", get(search_customers))
        .route(
            "/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

async fn list_customers(State(db): State<AppState>) -> Result<Json<Vec<CustomerView>>, ApiError> {
    let customers = db
        .run(|conn| {
            let service = CustomerService::new(SqliteCustomerRepository::new(conn));
            Ok(service.list_customers()?)
        })
        .await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

async fn search_customers(
    State(db): State<AppState>,
    PathParam(query): PathParam<String>,
) -> Result<Json<Vec<CustomerView>>, ApiError> {
    let customers = db
        .run(move |conn| {
            let service = CustomerService::new(SqliteCustomerRepository::new(conn));
            Ok(service.search_customers(&query)?)
        })
        .await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

async fn get_customer(
    State(db): State<AppState>,
    PathParam(id): PathParam<CustomerId>,
) -> Result<Json<CustomerDetailView>, ApiError> {
    let detail = db
        .run(move |conn| {
            let service = CustomerService::new(SqliteCustomerRepository::new(conn));
            Ok(service.get_customer(id)?)
        })
        .await?;
    Ok(Json(detail.into()))
}

async fn create_customer(
    State(db): State<AppState>,
    JsonBody(body): JsonBody<CustomerBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let draft = CustomerDraft::from(body);
    let id = db
        .run(move |conn| {
            let mut service = CustomerService::new(SqliteCustomerRepository::new(conn));
            Ok(service.create_customer(draft)?)
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Customer created successfully",
            "customerId": id,
        })),
    ))
}

async fn update_customer(
    State(db): State<AppState>,
    PathParam(id): PathParam<CustomerId>,
    JsonBody(body): JsonBody<CustomerBody>,
) -> Result<Json<Value>, ApiError> {
    let draft = CustomerDraft::from(body);
    db.run(move |conn| {
        let mut service = CustomerService::new(SqliteCustomerRepository::new(conn));
        Ok(service.update_customer(id, draft)?)
    })
    .await?;
    Ok(Json(json!({ "message": "Customer updated successfully" })))
}

async fn delete_customer(
    State(db): State<AppState>,
    PathParam(id): PathParam<CustomerId>,
) -> Result<Json<Value>, ApiError> {
    db.run(move |conn| {
        let service = CustomerService::new(SqliteCustomerRepository::new(conn));
        Ok(service.delete_customer(id)?)
    })
    .await?;
    Ok(Json(json!({ "message": "Customer deleted successfully" })))
}
