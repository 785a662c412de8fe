use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use sitework_core::error::CoreError;
use sitework_db::StageError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and sqlx errors for infrastructure
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses: `{"error": ..., "code": ...}` plus a `"field"` member for
/// validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `sitework-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<StageError> for AppError {
    fn from(err: StageError) -> Self {
        match err {
            StageError::Core(core) => AppError::Core(core),
            StageError::Database(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string(), None)
                }
                CoreError::Validation { field, .. } => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    core.to_string(),
                    Some(*field),
                ),
                CoreError::NoFieldsToUpdate => (
                    StatusCode::BAD_REQUEST,
                    "NO_FIELDS_TO_UPDATE",
                    core.to_string(),
                    None,
                ),
            },
            AppError::Database(err) => classify_sqlx_error(err),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(field) = field {
            body["field"] = json!(field);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, message, and
/// (absent) field.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message; the real error
///   goes to the logs.
fn classify_sqlx_error(
    err: &sqlx::Error,
) -> (StatusCode, &'static str, String, Option<&'static str>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
                None,
            )
        }
    }
}
