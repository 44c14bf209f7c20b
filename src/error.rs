// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the write path. The read path never returns these:
/// listing failures degrade to an empty board instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing or invalid required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("profile store is not configured")]
    NotConfigured,

    #[error("upstream store failure: {0}")]
    Upstream(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotConfigured => ApiError::NotConfigured,
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Missing or invalid required fields",
                    "details": fields,
                }),
            ),
            ApiError::NotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "error": "Profile store is not configured",
                    "details": "AIRTABLE_API_KEY and AIRTABLE_BASE_ID must be set",
                }),
            ),
            ApiError::Upstream(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to create profile",
                    "details": details,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
