//! Handlers for suppliers.
//!
//! The list endpoint returns [`SupplierSummary`] rows only; the full record
//! is available per id.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::entities::{Supplier, SupplierSummary};
use catalog_core::service;
use serde_json::Value;

use crate::error::AppResult;
use crate::handlers::{create_payload, update_payload};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let summaries: Vec<SupplierSummary> = service::list_supplier_summaries(&*state.store).await?;

    Ok(Json(DataResponse { data: summaries }))
}

/// GET /api/v1/suppliers/{id}
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let supplier: Supplier = service::get(&*state.store, &id).await?;

    Ok(Json(DataResponse { data: supplier }))
}

/// POST /api/v1/suppliers
pub async fn create_supplier(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = create_payload::<Supplier>(body)?;
    let supplier: Supplier = service::create(&*state.store, &payload).await?;

    tracing::info!(supplier_id = %supplier.meta.id, cnpj = %supplier.cnpj, "Supplier created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: supplier })))
}

/// PUT /api/v1/suppliers/{id}
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = update_payload::<Supplier>(body)?;
    let supplier: Supplier = service::update(&*state.store, &id, &payload).await?;

    tracing::info!(supplier_id = %supplier.meta.id, "Supplier updated");

    Ok(Json(DataResponse { data: supplier }))
}
