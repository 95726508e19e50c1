use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use url::Url;

/// Credential the fake provider rejects with 401.
pub const INVALID_API_KEY: &str = "invalid_key";
/// Product id that makes the fake provider fail with 500.
pub const SERVER_ERROR_ID: &str = "FAIL500000";
/// Product id that makes the fake provider answer 200 with a non-JSON body.
pub const BAD_JSON_ID: &str = "BADJSON000";
/// Product id that makes the fake provider answer after `SLOW_DELAY`.
pub const SLOW_ID: &str = "SLOW000000";
pub const SLOW_DELAY: Duration = Duration::from_secs(2);

/// Page kinds the fake provider knows how to "scrape".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Details,
    Reviews,
    Offers,
}

/// Canned payloads for one product.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Listing {
    pub details: Value,
    pub reviews: Value,
    pub offers: Value,
}

impl Listing {
    pub fn page(&self, page: Page) -> &Value {
        match page {
            Page::Details => &self.details,
            Page::Reviews => &self.reviews,
            Page::Offers => &self.offers,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScrapeQuery {
    pub api_key: Option<String>,
    pub autoparse: Option<String>,
    pub url: Option<String>,
}

/// Shared state of the fake provider: the catalog plus a record of every
/// request it received.
#[derive(Clone, Default)]
pub struct Scraper {
    catalog: Arc<RwLock<HashMap<String, Listing>>>,
    hits: Arc<AtomicUsize>,
    last_query: Arc<RwLock<Option<ScrapeQuery>>>,
}

impl Scraper {
    /// A provider whose catalog holds `B07XJ8C8F5`.
    pub fn seeded() -> Self {
        let listing = Listing {
            details: json!({
                "title": "Widget",
                "price": "$9.99",
                "rating": 4.5,
                "brand": "Acme",
                "availability_status": "In Stock"
            }),
            reviews: json!({
                "reviews": [
                    {"stars": 5, "title": "Great", "body": "Works as described."},
                    {"stars": 2, "title": "Meh", "body": "Broke after a week."}
                ]
            }),
            offers: json!({
                "offers": [
                    {"seller": "Acme Store", "price": "$9.99", "condition": "New"}
                ]
            }),
        };
        let catalog = HashMap::from([("B07XJ8C8F5".to_string(), listing)]);
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            ..Self::default()
        }
    }

    pub async fn insert(&self, id: &str, listing: Listing) {
        self.catalog.write().await.insert(id.to_string(), listing);
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub async fn last_query(&self) -> Option<ScrapeQuery> {
        self.last_query.read().await.clone()
    }
}

pub fn app(scraper: Scraper) -> Router {
    Router::new().route("/", get(scrape)).with_state(scraper)
}

pub async fn run(listener: TcpListener, scraper: Scraper) -> Result<(), std::io::Error> {
    axum::serve(listener, app(scraper)).await
}

/// Split a target-site URL into the page kind and the product id.
pub fn parse_target(target: &str) -> Option<(Page, String)> {
    let url = Url::parse(target).ok()?;
    let segments: Vec<&str> = url.path_segments()?.collect();
    match segments.as_slice() {
        ["dp", id] => Some((Page::Details, id.to_string())),
        ["product-reviews", id] => Some((Page::Reviews, id.to_string())),
        ["gp", "offer-listing", id] => Some((Page::Offers, id.to_string())),
        _ => None,
    }
}

async fn scrape(State(scraper): State<Scraper>, Query(query): Query<ScrapeQuery>) -> Response {
    scraper.hits.fetch_add(1, Ordering::SeqCst);
    *scraper.last_query.write().await = Some(query.clone());

    match query.api_key.as_deref() {
        None | Some(INVALID_API_KEY) => {
            return (StatusCode::UNAUTHORIZED, "Invalid API key").into_response();
        }
        Some(_) => {}
    }

    let Some((page, id)) = query.url.as_deref().and_then(parse_target) else {
        return (StatusCode::BAD_REQUEST, "Missing or unsupported url").into_response();
    };

    match id.as_str() {
        SERVER_ERROR_ID => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Scraping failed").into_response();
        }
        BAD_JSON_ID => return (StatusCode::OK, "<html>Robot check</html>").into_response(),
        SLOW_ID => {
            tokio::time::sleep(SLOW_DELAY).await;
            return Json(json!({"title": "Slow"})).into_response();
        }
        _ => {}
    }

    let catalog = scraper.catalog.read().await;
    match catalog.get(&id) {
        Some(listing) => Json(listing.page(page).clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Product not found").into_response(),
    }
}
