use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

use crate::models::schema::ValidationError;

/// Error body returned for malformed ids, validation failures and unknown endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable error description.
    #[schema(example = "malformatted id")]
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Application-level error type.
///
/// Handlers never render failures themselves; everything funnels through
/// `IntoResponse` below.
#[derive(Debug)]
pub enum AppError {
    /// The path id is not a syntactically valid record handle.
    MalformedId,
    Validation(String),
    /// No record matches the id. Rendered with an empty body.
    NotFound,
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MalformedId => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new("malformatted id")),
            )
                .into_response(),
            AppError::Validation(msg) => {
                tracing::debug!("Validation failed: {msg}");
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(msg))).into_response()
            }
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::warn!("Unique constraint violated: {detail}");
                AppError::Validation(format!("expected unique value: {detail}"))
            }
            _ => AppError::Internal(err.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Fallback handler for routes that match nothing.
pub async fn unknown_endpoint() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("unknown endpoint")))
}
