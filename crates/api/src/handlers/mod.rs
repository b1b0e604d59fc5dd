//! Request handlers, one module per catalog resource.

pub mod addresses;
pub mod categories;
pub mod category_lines;
pub mod products;
pub mod suppliers;

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::Multipart;
use axum::Json;
use catalog_core::entities::Entity;
use catalog_core::error::CoreError;
use catalog_core::service::ImportOutcome;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Multipart field carrying an uploaded CSV file.
pub const UPLOAD_FIELD: &str = "data_file";

/// Unwrap a create body, turning any rejection into the entity's
/// missing-fields error.
pub(crate) fn create_payload<E: Entity>(
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Value> {
    json_payload::<E>(body, E::REQUIRED_FIELDS)
}

/// Same as [`create_payload`] for update bodies, which may name a different
/// field list.
pub(crate) fn update_payload<E: Entity>(
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Value> {
    json_payload::<E>(body, E::UPDATE_REQUIRED_FIELDS)
}

fn json_payload<E: Entity>(
    body: Result<Json<Value>, JsonRejection>,
    required: &[&str],
) -> AppResult<Value> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => {
            tracing::debug!(entity = %E::KIND, error = %rejection, "Rejected JSON body");
            Err(CoreError::invalid_json(required).into())
        }
    }
}

/// Read the bytes of the uploaded CSV file.
///
/// A request that is not multipart, or has no non-empty `data_file` field,
/// yields [`CoreError::NoFile`].
pub(crate) async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Vec<u8>> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected multipart body");
        AppError::Core(CoreError::NoFile)
    })?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if data.is_empty() {
            break;
        }
        return Ok(data.to_vec());
    }

    Err(CoreError::NoFile.into())
}

/// Log what an import did.
pub(crate) fn log_import<E: Entity>(outcome: &ImportOutcome<E>) {
    if !outcome.repeated.is_empty() {
        tracing::warn!(
            entity = %E::KIND,
            repeated = ?outcome.repeated,
            "Repeated keys in file were written once",
        );
    }
    tracing::info!(
        entity = %E::KIND,
        created = outcome.created.len(),
        updated = outcome.updated.len(),
        skipped = outcome.skipped.len(),
        "CSV import applied",
    );
}
