//! Handlers for categories, including the CSV import and export endpoints.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::entities::Category;
use catalog_core::import::{parse_single_column, ImportStrategy};
use catalog_core::service::{self, ImportOutcome};
use serde_json::Value;

use crate::error::AppResult;
use crate::handlers::{create_payload, log_import, read_upload, update_payload};
use crate::response::{csv_attachment, DataResponse};
use crate::state::AppState;

/// Column read from an uploaded category file; also the reconciliation key.
const IMPORT_KEY: &str = "name";

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories: Vec<Category> = service::list(&*state.store).await?;

    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let category: Category = service::get(&*state.store, &id).await?;

    Ok(Json(DataResponse { data: category }))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = create_payload::<Category>(body)?;
    let category: Category = service::create(&*state.store, &payload).await?;

    tracing::info!(category_id = %category.meta.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/categories/{id}
///
/// Only `name` and `active` can change; the profit percentage is fixed at
/// creation.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = update_payload::<Category>(body)?;
    let category: Category = service::update(&*state.store, &id, &payload).await?;

    tracing::info!(category_id = %category.meta.id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// GET /api/v1/categories/export
pub async fn export_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let csv = service::export::<Category, _>(&*state.store, Category::EXPORT_COLUMNS).await?;

    Ok(csv_attachment("Categories.csv", csv))
}

/// POST /api/v1/categories/import
///
/// Reads the `name` column of the uploaded file and inserts every name not
/// already present. Fails with `DataAlreadyExists` when nothing is new.
pub async fn import_categories(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<impl IntoResponse> {
    let data = read_upload(multipart).await?;
    let rows = parse_single_column(&data, IMPORT_KEY)?;
    let outcome: ImportOutcome<Category> =
        service::import(&*state.store, rows, IMPORT_KEY, ImportStrategy::SkipExisting).await?;

    log_import(&outcome);

    Ok(Json(DataResponse { data: outcome }))
}
