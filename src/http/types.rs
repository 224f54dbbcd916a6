use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::error::TodoError;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthzResponse { pub message: String }

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody { pub error: String }

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => {
                tracing::debug!(error = %self, "rejected request");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(cause) => {
                tracing::error!(%cause, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };
        (status, axum::Json(ErrorBody { error: message })).into_response()
    }
}

impl From<TodoError> for ApiError {
    fn from(e: TodoError) -> Self {
        match e {
            TodoError::NotFound => ApiError::NotFound,
            TodoError::InvalidSubject => ApiError::BadRequest(TodoError::InvalidSubject.to_string()),
            TodoError::Internal(cause) => ApiError::Internal(format!("{cause:#}")),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
