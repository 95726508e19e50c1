//! Error types for the scraping provider client.
//!
//! # Design
//! Every non-2xx upstream response lands in `HttpError` with the raw status
//! and body. `ApiError::is_client_error` decides whether that status is
//! relayed to the caller or collapsed into a generic failure.
//!
//! The `HttpError` message renders the body as a JSON string literal, e.g.
//! `404 - "Product not found"`.

use thiserror::Error;

/// Errors returned by `ScraperClient` construction and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The provider returned a non-2xx status.
    #[error("{} - {}", .status, json_quoted(.body))]
    HttpError { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The provider endpoint or target site could not be parsed as a URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Upstream status code, if the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the upstream status is in `[400, 500)`.
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }
}

fn json_quoted(body: &str) -> String {
    serde_json::Value::String(body.to_owned()).to_string()
}

/// A product identifier failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid product ID")]
pub struct InvalidProductId;
