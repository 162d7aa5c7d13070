use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API Error for the HTTP surface
///
/// Only request-shape problems reach the caller as a failing status.
/// Upstream and parse failures are recovered inside the service and
/// never become an `ApiError`.
#[derive(Error, Debug)]
pub enum ApiError {
    // Request errors 4xxx
    #[error("Only POST")]
    MethodNotAllowed,

    #[error("{0}")]
    ValidationError(String),
}

impl ApiError {
    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error body, `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!("Request rejected ({}): {}", status, self);

        let response = ApiErrorResponse { error: self.to_string() };

        (status, Json(response)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
