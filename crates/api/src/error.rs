use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `catalog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Machine-readable code for a domain error.
pub fn core_error_code(err: &CoreError) -> &'static str {
    match err {
        CoreError::EmptyField { .. } => "EMPTY_FIELD",
        CoreError::WrongType { .. } => "WRONG_TYPE",
        CoreError::WrongShape { .. } => "WRONG_SHAPE",
        CoreError::WrongSize { .. } => "WRONG_SIZE",
        CoreError::InvalidJson { .. } => "INVALID_JSON",
        CoreError::IdNotFound => "ID_NOT_FOUND",
        CoreError::InvalidValue { .. } => "INVALID_VALUE",
        CoreError::DuplicateValue { .. } => "DUPLICATE_VALUE",
        CoreError::InvalidDate(_) => "INVALID_DATE",
        CoreError::InvalidEmail => "INVALID_EMAIL",
        CoreError::NoFile => "NO_FILE",
        CoreError::DataAlreadyExists => "DATA_ALREADY_EXISTS",
        CoreError::ColumnsMismatch => "COLUMNS_MISMATCH",
        CoreError::ConversionFailure => "CONVERSION_FAILURE",
        CoreError::RepeatedInFile { .. } => "REPEATED_IN_FILE",
        CoreError::NothingToExport => "NOTHING_TO_EXPORT",
        CoreError::Internal(_) => "INTERNAL_ERROR",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            // Every other domain error is a client mistake.
            AppError::Core(core) => (
                StatusCode::BAD_REQUEST,
                core_error_code(core),
                core.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
