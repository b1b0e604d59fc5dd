//! Handlers for category lines. A line belongs to one category and carries
//! its own profit percentage.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::entities::CategoryLine;
use catalog_core::service;
use serde_json::Value;

use crate::error::AppResult;
use crate::handlers::{create_payload, update_payload};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/category-lines
pub async fn list_category_lines(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let lines: Vec<CategoryLine> = service::list(&*state.store).await?;

    Ok(Json(DataResponse { data: lines }))
}

/// GET /api/v1/category-lines/{id}
pub async fn get_category_line(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let line: CategoryLine = service::get(&*state.store, &id).await?;

    Ok(Json(DataResponse { data: line }))
}

/// POST /api/v1/category-lines
pub async fn create_category_line(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = create_payload::<CategoryLine>(body)?;
    let line: CategoryLine = service::create(&*state.store, &payload).await?;

    tracing::info!(
        category_line_id = %line.meta.id,
        category_id = %line.category_id,
        "Category line created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: line })))
}

/// PUT /api/v1/category-lines/{id}
pub async fn update_category_line(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let payload = update_payload::<CategoryLine>(body)?;
    let line: CategoryLine = service::update(&*state.store, &id, &payload).await?;

    tracing::info!(category_line_id = %line.meta.id, "Category line updated");

    Ok(Json(DataResponse { data: line }))
}
