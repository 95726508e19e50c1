//! Stateless request builder and response shaper for the scraping provider.
//!
//! # Design
//! `ScraperClient` holds only the provider endpoint, the target site and the
//! per-request timeout, and carries no mutable state between calls. Request
//! building and response parsing are split so the caller owns the I/O.
//!
//! Every value interpolated into the provider URL goes through
//! `url::form_urlencoded`, so credentials containing `&`, `=` or spaces
//! cannot change the shape of the query string.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::product_id::ProductId;
use crate::types::{OffersSummary, ProductSummary, ReviewsSummary};

pub const DEFAULT_ENDPOINT: &str = "http://api.scraperapi.com";
pub const DEFAULT_TARGET_SITE: &str = "https://www.amazon.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A page on the target site that the provider can scrape for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Details,
    Reviews,
    Offers,
}

impl Resource {
    /// Path prefix of the resource's page on the target site.
    pub const fn path_prefix(self) -> &'static str {
        match self {
            Resource::Details => "dp",
            Resource::Reviews => "product-reviews",
            Resource::Offers => "gp/offer-listing",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Resource::Details => "details",
            Resource::Reviews => "reviews",
            Resource::Offers => "offers",
        }
    }
}

/// Builds provider requests and shapes provider responses without touching
/// the network.
#[derive(Debug, Clone)]
pub struct ScraperClient {
    endpoint: Url,
    target_site: String,
    timeout: Duration,
}

impl ScraperClient {
    pub fn new(endpoint: &str, target_site: &str) -> Result<Self, ApiError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| ApiError::InvalidUrl(format!("{endpoint}: {e}")))?;
        Url::parse(target_site).map_err(|e| ApiError::InvalidUrl(format!("{target_site}: {e}")))?;
        Ok(Self {
            endpoint,
            target_site: target_site.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL of the resource's page on the target site.
    pub fn target_url(&self, resource: Resource, id: &ProductId) -> String {
        format!("{}/{}/{id}", self.target_site, resource.path_prefix())
    }

    pub fn build_request(&self, resource: Resource, api_key: &str, id: &ProductId) -> HttpRequest {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("api_key", api_key)
            .append_pair("autoparse", "true")
            .append_pair("url", &self.target_url(resource, id));
        HttpRequest::get(url.to_string(), self.timeout)
    }

    pub fn parse_details(&self, response: HttpResponse) -> Result<ProductSummary, ApiError> {
        let payload = parse_payload(response)?;
        Ok(ProductSummary::from_payload(&payload))
    }

    pub fn parse_reviews(&self, response: HttpResponse) -> Result<ReviewsSummary, ApiError> {
        let payload = parse_payload(response)?;
        Ok(ReviewsSummary::from_payload(&payload))
    }

    pub fn parse_offers(&self, response: HttpResponse) -> Result<OffersSummary, ApiError> {
        let payload = parse_payload(response)?;
        Ok(OffersSummary::from_payload(&payload))
    }
}

/// Reject non-2xx responses, then parse the body as JSON.
fn parse_payload(response: HttpResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use serde_json::json;

    fn client() -> ScraperClient {
        ScraperClient::new(DEFAULT_ENDPOINT, DEFAULT_TARGET_SITE).unwrap()
    }

    fn id() -> ProductId {
        ProductId::parse("B07XJ8C8F5").unwrap()
    }

    fn query(req: &HttpRequest) -> Vec<(String, String)> {
        Url::parse(&req.url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn build_details_request() {
        let req = client().build_request(Resource::Details, "secret", &id());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://api.scraperapi.com/?api_key=secret&autoparse=true\
             &url=https%3A%2F%2Fwww.amazon.com%2Fdp%2FB07XJ8C8F5"
        );
        assert_eq!(req.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn build_request_targets_each_resource_page() {
        let c = client();
        let cases = [
            (Resource::Details, "https://www.amazon.com/dp/B07XJ8C8F5"),
            (Resource::Reviews, "https://www.amazon.com/product-reviews/B07XJ8C8F5"),
            (Resource::Offers, "https://www.amazon.com/gp/offer-listing/B07XJ8C8F5"),
        ];
        for (resource, target) in cases {
            let req = c.build_request(resource, "k", &id());
            let pairs = query(&req);
            assert_eq!(pairs[2], ("url".to_string(), target.to_string()), "{resource:?}");
        }
    }

    #[test]
    fn query_parameters_are_ordered() {
        let req = client().build_request(Resource::Offers, "k", &id());
        let keys: Vec<_> = query(&req).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["api_key", "autoparse", "url"]);
    }

    #[test]
    fn credential_with_reserved_characters_is_encoded() {
        let key = "a&autoparse=false&url=http://evil.test #x";
        let req = client().build_request(Resource::Details, key, &id());
        let pairs = query(&req);
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("api_key".to_string(), key.to_string()));
        assert_eq!(pairs[1], ("autoparse".to_string(), "true".to_string()));
        assert!(!req.url.contains('#'));
    }

    #[test]
    fn empty_credential_is_passed_through() {
        let req = client().build_request(Resource::Details, "", &id());
        assert_eq!(query(&req)[0], ("api_key".to_string(), String::new()));
    }

    #[test]
    fn trailing_slash_on_target_site_is_stripped() {
        let c = ScraperClient::new(DEFAULT_ENDPOINT, "https://www.amazon.co.uk/").unwrap();
        assert_eq!(
            c.target_url(Resource::Details, &id()),
            "https://www.amazon.co.uk/dp/B07XJ8C8F5"
        );
    }

    #[test]
    fn custom_timeout_is_carried_on_requests() {
        let c = client().with_timeout(Duration::from_millis(250));
        let req = c.build_request(Resource::Reviews, "k", &id());
        assert_eq!(req.timeout, Duration::from_millis(250));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = ScraperClient::new("not a url", DEFAULT_TARGET_SITE).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        let err = ScraperClient::new(DEFAULT_ENDPOINT, "amazon.com").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn parse_details_success() {
        let response = HttpResponse::new(200, r#"{"title":"Widget","price":"$9.99","rating":4.5}"#);
        let summary = client().parse_details(response).unwrap();
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            json!({"title": "Widget", "price": "$9.99", "rating": 4.5})
        );
    }

    #[test]
    fn parse_reviews_and_offers_yield_empty_objects() {
        let body = r#"{"reviews":[{"stars":5}],"offers":[{"seller":"x"}]}"#;
        let reviews = client().parse_reviews(HttpResponse::new(200, body)).unwrap();
        let offers = client().parse_offers(HttpResponse::new(200, body)).unwrap();
        assert_eq!(serde_json::to_string(&reviews).unwrap(), "{}");
        assert_eq!(serde_json::to_string(&offers).unwrap(), "{}");
    }

    #[test]
    fn parse_not_found() {
        let err = client()
            .parse_details(HttpResponse::new(404, "Product not found"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), r#"404 - "Product not found""#);
    }

    #[test]
    fn parse_server_error() {
        let err = client()
            .parse_reviews(HttpResponse::new(500, "boom"))
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_client_error());
    }

    #[test]
    fn parse_redirect_is_not_success() {
        let err = client()
            .parse_offers(HttpResponse::new(302, ""))
            .unwrap_err();
        assert_eq!(err.status(), Some(302));
        assert!(!err.is_client_error());
    }

    #[test]
    fn parse_bad_json() {
        let err = client()
            .parse_details(HttpResponse::new(200, "<html>not json</html>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_empty_body_is_not_json() {
        let err = client().parse_reviews(HttpResponse::new(200, "")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
