//! Handlers for supplier addresses.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::entities::Address;
use catalog_core::service;
use serde_json::Value;

use crate::error::AppResult;
use crate::handlers::{create_payload, update_payload};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/addresses
pub async fn list_addresses(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let addresses: Vec<Address> = service::list(&*state.store).await?;

    Ok(Json(DataResponse { data: addresses }))
}

/// GET /api/v1/addresses/{id}
pub async fn get_address(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let address: Address = service::get(&*state.store, &id).await?;

    Ok(Json(DataResponse { data: address }))
}

/// POST /api/v1/addresses
pub async fn create_address(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = create_payload::<Address>(body)?;
    let address: Address = service::create(&*state.store, &payload).await?;

    tracing::info!(address_id = %address.meta.id, "Address created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: address })))
}

/// PUT /api/v1/addresses/{id}
pub async fn update_address(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = update_payload::<Address>(body)?;
    let address: Address = service::update(&*state.store, &id, &payload).await?;

    tracing::info!(address_id = %address.meta.id, "Address updated");

    Ok(Json(DataResponse { data: address }))
}
