//! I/O-free core of the product lookup façade.
//!
//! # Overview
//! Validates product identifiers, builds requests against the scraping
//! provider, and shapes the provider's JSON into the service's output types
//! (host-does-IO pattern). The caller executes the actual HTTP round-trip,
//! so everything here is deterministic and testable without a network.
//!
//! # Design
//! - `ProductId` can only be obtained through validation, and
//!   `ScraperClient::build_request` only accepts a `ProductId`. An
//!   unvalidated identifier never reaches an outbound request.
//! - Each resource is split into `build_request` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Upstream status classification lives on `ApiError` so the server's
//!   error mapper does not need to know how statuses are carried.

pub mod client;
pub mod error;
pub mod http;
pub mod product_id;
pub mod types;

pub use client::{Resource, ScraperClient, DEFAULT_ENDPOINT, DEFAULT_TARGET_SITE, DEFAULT_TIMEOUT};
pub use error::{ApiError, InvalidProductId};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use product_id::{is_valid_product_id, ProductId, PRODUCT_ID_LEN};
pub use types::{OffersSummary, ProductSummary, ReviewsSummary};
