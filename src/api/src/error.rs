//! HTTP error taxonomy
//!
//! Every failure this service can report originates in the boundary layer:
//! bad requests, denied permission checks, and upstream listing failures.
//! The resolution core is total and contributes no variants.

use crate::client::ClientError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error code
    pub error: String,
    /// Human-readable detail
    pub message: String,
}

/// API-layer errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required query parameter was missing or empty
    #[error("{0} is required")]
    MissingParameter(&'static str),

    /// The caller lacks the permission the endpoint requires
    #[error("you do not have permission to {0}")]
    Forbidden(&'static str),

    /// An upstream listing call failed
    #[error(transparent)]
    Upstream(#[from] ClientError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::MissingParameter(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
        };

        let message = self.to_string();
        if status.is_server_error() {
            error!(%status, "{}", message);
        }

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
