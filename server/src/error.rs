use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::{JobId, ValidationError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::JobNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            ApiError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": e.to_string(), "errors": e.errors() })),
            )
                .into_response(),
        }
    }
}
