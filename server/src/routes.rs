use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use scraper_core::{
    ApiError, HttpResponse, OffersSummary, ProductId, ProductSummary, Resource, ReviewsSummary,
    ScraperClient,
};
use crate::error::AppError;
use crate::AppState;

pub const HEALTH_MESSAGE: &str = "Amazon Scraper API now running.";

const API_KEY_PARAM: &str = "api_key";

type Shaper<T> = fn(&ScraperClient, HttpResponse) -> Result<T, ApiError>;

pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

pub async fn product_details(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<ProductSummary>, AppError> {
    lookup(&state, Resource::Details, &product_id, query, ScraperClient::parse_details)
        .await
        .map(Json)
}

pub async fn product_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<ReviewsSummary>, AppError> {
    lookup(&state, Resource::Reviews, &product_id, query, ScraperClient::parse_reviews)
        .await
        .map(Json)
}

pub async fn product_offers(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<OffersSummary>, AppError> {
    lookup(&state, Resource::Offers, &product_id, query, ScraperClient::parse_offers)
        .await
        .map(Json)
}

/// Validate, build, call the provider once, then shape.
async fn lookup<T>(
    state: &AppState,
    resource: Resource,
    raw_id: &str,
    query: Option<String>,
    shape: Shaper<T>,
) -> Result<T, AppError> {
    let id = ProductId::parse(raw_id)?;
    let api_key = resolve_api_key(query.as_deref(), &state.default_api_key);

    let request = state.client.build_request(resource, &api_key, &id);
    tracing::debug!(resource = resource.name(), product_id = %id, "calling scraping provider");

    let response = state.upstream.execute(request).await?;
    tracing::debug!(resource = resource.name(), status = response.status, "provider responded");

    Ok(shape(&state.client, response)?)
}

/// Caller credential from the raw query string, else `default`.
///
/// Repeated `api_key` parameters are joined with `,` in order of appearance.
/// An empty `api_key=` counts as present.
pub fn resolve_api_key(query: Option<&str>, default: &str) -> String {
    let values: Vec<String> = query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .filter(|(name, _)| name == API_KEY_PARAM)
                .map(|(_, value)| value.into_owned())
                .collect()
        })
        .unwrap_or_default();

    if values.is_empty() {
        default.to_string()
    } else {
        values.join(",")
    }
}
