//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use catalog_api::error::AppError;
use catalog_core::error::{CoreError, DateProblem, ExpectedType};
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn empty_field_returns_400_with_message() {
    let err = AppError::Core(CoreError::EmptyField {
        fields: vec!["street".into(), "city".into()],
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "EMPTY_FIELD");
    assert_eq!(
        json["error"],
        "The following field(s) cannot be empty: street, city"
    );
}

#[tokio::test]
async fn wrong_type_returns_400() {
    let err = AppError::Core(CoreError::WrongType {
        fields: vec!["unit_box".into()],
        expected: ExpectedType::PositiveInt,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "WRONG_TYPE");
}

#[tokio::test]
async fn id_not_found_is_a_client_error() {
    let (status, json) = error_to_response(AppError::Core(CoreError::IdNotFound)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "ID_NOT_FOUND");
    assert_eq!(json["error"], "The ID(s) inserted does not exist in the database");
}

#[tokio::test]
async fn import_errors_have_distinct_codes() {
    let cases = [
        (CoreError::NoFile, "NO_FILE"),
        (CoreError::DataAlreadyExists, "DATA_ALREADY_EXISTS"),
        (CoreError::ColumnsMismatch, "COLUMNS_MISMATCH"),
        (CoreError::ConversionFailure, "CONVERSION_FAILURE"),
        (CoreError::NothingToExport, "NOTHING_TO_EXPORT"),
        (CoreError::InvalidDate(DateProblem::Expired), "INVALID_DATE"),
    ];
    for (err, code) in cases {
        let (status, json) = error_to_response(AppError::Core(err)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], code);
    }
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("malformed multipart body".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "malformed multipart body");
}

#[tokio::test]
async fn core_internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Internal("connection refused on 10.0.0.3".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
