//! Output shapes returned to callers.
//!
//! # Design
//! Shaping works on an arbitrary `serde_json::Value`. Fields are copied
//! verbatim with no type coercion; a field missing upstream is omitted from
//! the output rather than emitted as `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shaped product details: `title`, `price` and `rating` exactly as the
/// provider returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
}

impl ProductSummary {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            title: payload.get("title").cloned(),
            price: payload.get("price").cloned(),
            rating: payload.get("rating").cloned(),
        }
    }
}

/// Shaped review listing.
///
/// No review fields are extracted yet, so this is always `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewsSummary {}

impl ReviewsSummary {
    // TODO: extract review entries once the provider's review schema is pinned down.
    pub fn from_payload(_payload: &Value) -> Self {
        Self {}
    }
}

/// Shaped offer listing.
///
/// No offer fields are extracted yet, so this is always `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffersSummary {}

impl OffersSummary {
    // TODO: extract offers once the provider's offer-listing schema is pinned down.
    pub fn from_payload(_payload: &Value) -> Self {
        Self {}
    }
}
