//! Handlers for products.
//!
//! Reads return [`PricedProduct`]s, whose `cost_values` include the category
//! and category line markups. Writes and exports use the stored cost.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::entities::{PricedProduct, Product};
use catalog_core::import::{parse_products, ImportStrategy};
use catalog_core::service::{self, ImportOutcome};
use serde_json::Value;

use crate::error::AppResult;
use crate::handlers::{create_payload, log_import, read_upload, update_payload};
use crate::response::{csv_attachment, DataResponse};
use crate::state::AppState;

const IMPORT_KEY: &str = "sku";

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/products
pub async fn list_products(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let products: Vec<PricedProduct> = service::list_priced_products(&*state.store).await?;

    Ok(Json(DataResponse { data: products }))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let product = service::get_priced_product(&*state.store, &id).await?;

    Ok(Json(DataResponse { data: product }))
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = create_payload::<Product>(body)?;
    let product: Product = service::create(&*state.store, &payload).await?;

    tracing::info!(product_id = %product.meta.id, sku = %product.sku, "Product created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /api/v1/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = update_payload::<Product>(body)?;
    let product: Product = service::update(&*state.store, &id, &payload).await?;

    tracing::info!(product_id = %product.meta.id, "Product updated");

    Ok(Json(DataResponse { data: product }))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// GET /api/v1/products/export
pub async fn export_products(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let csv = service::export::<Product, _>(&*state.store, Product::EXPORT_COLUMNS).await?;

    Ok(csv_attachment("Products.csv", csv))
}

/// POST /api/v1/products/import
///
/// Inserts rows whose SKU is not yet stored; known SKUs are skipped.
pub async fn import_products(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<impl IntoResponse> {
    run_import(state, multipart, ImportStrategy::SkipExisting).await
}

/// POST /api/v1/products/import-by-supplier
///
/// Inserts new SKUs and overwrites products whose SKU is already stored.
pub async fn import_products_by_supplier(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<impl IntoResponse> {
    run_import(state, multipart, ImportStrategy::Upsert).await
}

async fn run_import(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
    strategy: ImportStrategy,
) -> AppResult<Json<DataResponse<ImportOutcome<Product>>>> {
    let data = read_upload(multipart).await?;
    let rows = parse_products(&data)?;
    let outcome: ImportOutcome<Product> =
        service::import(&*state.store, rows, IMPORT_KEY, strategy).await?;

    log_import(&outcome);

    Ok(Json(DataResponse { data: outcome }))
}
