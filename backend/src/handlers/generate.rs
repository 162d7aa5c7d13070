//! Satire generation handler
//!
//! The single public endpoint. Only the request shape can make it fail;
//! anything that goes wrong after validation is answered with fallback
//! content and an advisory `error` field.

use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;

use crate::AppState;
use crate::models::SatireResponse;
use crate::utils::{ApiError, ApiResult};

/// POST /api/generate
///
/// The body is decoded as JSON whatever the `Content-Type`; anything that
/// is not a JSON object behaves like `{}`.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<SatireResponse>> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("generate", %request_id);

    async move {
        let body: Value = serde_json::from_slice(&body).unwrap_or_else(|e| {
            tracing::debug!("Request body is not JSON: {}", e);
            Value::Null
        });

        let response = state.satire_service.generate(&body).await?;
        tracing::info!(
            fallback_error = response.error.as_deref().unwrap_or(""),
            "Generated satire of type {}",
            response.category
        );
        Ok::<_, ApiError>(Json(response))
    }
    .instrument(span)
    .await
}

/// Any other method on the endpoint
pub async fn only_post() -> ApiError {
    ApiError::MethodNotAllowed
}
