//! Maps lookup failures onto HTTP responses.
//!
//! Two outcomes only: an invalid identifier or an upstream 4xx is relayed
//! with its own status, anything else is logged and collapsed into a
//! generic 500. Both use the `{"error": "..."}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scraper_core::{ApiError, InvalidProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::upstream::TransportError;

pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// JSON error envelope returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidProductId(#[from] InvalidProductId),

    #[error(transparent)]
    Upstream(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl AppError {
    /// Status relayed to the caller, or `None` for failures that become a
    /// generic 500.
    pub fn passthrough_status(&self) -> Option<StatusCode> {
        match self {
            AppError::InvalidProductId(_) => Some(StatusCode::BAD_REQUEST),
            AppError::Upstream(e) if e.is_client_error() => {
                e.status().and_then(|s| StatusCode::from_u16(s).ok())
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.passthrough_status() {
            Some(status) => (status, Json(ErrorBody { error: self.to_string() })).into_response(),
            None => {
                tracing::error!(error = ?self, "product lookup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: GENERIC_ERROR_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Failures while assembling `AppState` from configuration.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid scraper configuration: {0}")]
    Client(#[from] ApiError),

    #[error("failed to build HTTP client: {0}")]
    Transport(#[from] TransportError),
}
