//! HTTP access to the Google Maps web services.
//!
//! [`MapsClient`] owns a pooled `reqwest` client and runs the two request
//! pipelines: fetch the raw payload, check the API-level status, normalize.
//! A non-success HTTP status aborts the pipeline before the body is parsed.

use std::fmt;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::config::MapsConfig;
use crate::directions::{normalize_directions, DirectionsQuery, DirectionsResponse, DirectionsResult};
use crate::error::{Error, Result};
use crate::places::{normalize_places, PlaceResult, PlacesResponse};

const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Upstream web service addressed by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Directions,
    PlaceTextSearch,
}

impl Endpoint {
    /// Path relative to the configured API root.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Directions => "directions/json",
            Endpoint::PlaceTextSearch => "place/textsearch/json",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Directions => write!(f, "directions"),
            Endpoint::PlaceTextSearch => write!(f, "place text search"),
        }
    }
}

/// Client for the directions and place text-search endpoints.
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: Client,
    config: MapsConfig,
}

impl MapsClient {
    /// Build a client from configuration.
    ///
    /// A missing API key is logged but not fatal; every request will fail
    /// with [`Error::MissingApiKey`] until one is configured.
    pub fn new(config: MapsConfig) -> Result<Self> {
        if !config.has_api_key() {
            warn!(
                "{} is not set; tool calls will fail until it is configured",
                crate::config::API_KEY_ENV
            );
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &MapsConfig {
        &self.config
    }

    /// Full URL for an endpoint, without query parameters.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.config.base_url, endpoint.path())
    }

    /// Issue a GET against `endpoint` and decode the JSON body as `T`.
    ///
    /// The API key is appended as the `key` parameter. Parameter values are
    /// URL-encoded by the HTTP client.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let key = self.config.api_key.as_deref().ok_or(Error::MissingApiKey)?;

        debug!(%endpoint, "sending upstream request");
        let response = self
            .http
            .get(self.endpoint_url(endpoint))
            .query(params)
            .query(&[("key", key)])
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            error!(%endpoint, status = status.as_u16(), "upstream request failed");
            return Err(Error::UpstreamHttp {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        serde_json::from_slice(&body).map_err(|source| {
            error!(%endpoint, error = %source, "upstream body is not the expected JSON");
            Error::Decode { endpoint, source }
        })
    }

    /// Run a free-text place search and normalize the hits.
    pub async fn search_places(&self, query: &str) -> Result<PlaceResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::invalid("query", "cannot be empty"));
        }

        let endpoint = Endpoint::PlaceTextSearch;
        let raw: PlacesResponse = self.fetch_json(endpoint, &[("query", query)]).await?;
        check_status(endpoint, &raw.status, raw.error_message.as_deref())?;

        let result = normalize_places(raw).ok_or(Error::NoResults { endpoint })?;
        info!(%endpoint, places = result.places.len(), "place search complete");
        Ok(result)
    }

    /// Compute directions for `query` and normalize the first route/leg.
    pub async fn directions(&self, query: &DirectionsQuery) -> Result<DirectionsResult> {
        query.validate()?;

        let endpoint = Endpoint::Directions;
        let raw: DirectionsResponse = self
            .fetch_json(
                endpoint,
                &[
                    ("origin", query.origin.trim()),
                    ("destination", query.destination.trim()),
                    ("mode", query.mode.as_str()),
                ],
            )
            .await?;
        check_status(endpoint, &raw.status, raw.error_message.as_deref())?;

        let result = normalize_directions(raw).ok_or(Error::NoResults { endpoint })?;
        info!(%endpoint, steps = result.steps.len(), "directions complete");
        Ok(result)
    }
}

/// Translate an API-level status into an error before normalization.
fn check_status(endpoint: Endpoint, status: &str, message: Option<&str>) -> Result<()> {
    match status {
        crate::directions::STATUS_OK => Ok(()),
        STATUS_ZERO_RESULTS => {
            info!(%endpoint, "upstream returned zero results");
            Err(Error::NoResults { endpoint })
        }
        other => {
            error!(%endpoint, status = other, upstream_message = message, "upstream rejected the request");
            Err(Error::UpstreamStatus {
                endpoint,
                status: other.to_string(),
                message: message.map(str::to_string),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::TravelMode;
    use crate::test_utils::{FakeUpstream, Reply};

    fn client_for(upstream: &FakeUpstream) -> MapsClient {
        MapsClient::new(
            MapsConfig::default()
                .with_api_key("test-key")
                .with_base_url(upstream.base_url()),
        )
        .expect("client builds")
    }

    #[test]
    fn endpoint_url_joins_base_and_path() {
        let client = MapsClient::new(MapsConfig::default().with_base_url("http://x/api/")).unwrap();
        assert_eq!(client.endpoint_url(Endpoint::Directions), "http://x/api/directions/json");
        assert_eq!(
            client.endpoint_url(Endpoint::PlaceTextSearch),
            "http://x/api/place/textsearch/json"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let upstream = FakeUpstream::spawn().await;
        let client = MapsClient::new(MapsConfig::default().with_base_url(upstream.base_url()))
            .expect("client builds");

        let err = client.search_places("coffee").await.unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
        assert!(upstream.requests().is_empty());
    }

    #[tokio::test]
    async fn place_search_sends_encoded_query_and_key() {
        let upstream = FakeUpstream::spawn().await;
        let client = client_for(&upstream);

        let result = client.search_places("  pizza & pasta near Köln ").await.expect("search");
        assert_eq!(result.places.len(), 3);

        let requests = upstream.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/place/textsearch/json");
        assert_eq!(requests[0].param("query"), Some("pizza & pasta near Köln"));
        assert_eq!(requests[0].param("key"), Some("test-key"));
    }

    #[tokio::test]
    async fn directions_send_mode_and_endpoints() {
        let upstream = FakeUpstream::spawn().await;
        let client = client_for(&upstream);

        let query = DirectionsQuery::new("Central Station", "Harbour Park", TravelMode::Transit);
        let result = client.directions(&query).await.expect("directions");
        assert!(!result.steps.is_empty());

        let requests = upstream.requests();
        assert_eq!(requests[0].path, "/directions/json");
        assert_eq!(requests[0].param("origin"), Some("Central Station"));
        assert_eq!(requests[0].param("destination"), Some("Harbour Park"));
        assert_eq!(requests[0].param("mode"), Some("transit"));
    }

    #[tokio::test]
    async fn empty_query_is_rejected_without_request() {
        let upstream = FakeUpstream::spawn().await;
        let client = client_for(&upstream);

        let err = client.search_places("   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { field: "query", .. }));

        let err = client
            .directions(&DirectionsQuery::new("", "B", TravelMode::Driving))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { field: "origin", .. }));
        assert!(upstream.requests().is_empty());
    }

    #[tokio::test]
    async fn http_error_status_aborts_before_parsing() {
        let upstream = FakeUpstream::spawn().await;
        upstream.set_reply(Reply::status(503, "<html>Service Unavailable</html>"));
        let client = client_for(&upstream);

        let err = client.search_places("coffee").await.unwrap_err();
        assert!(matches!(
            err,
            Error::UpstreamHttp {
                endpoint: Endpoint::PlaceTextSearch,
                status: 503
            }
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let upstream = FakeUpstream::spawn().await;
        upstream.set_reply(Reply::status(200, "not json"));
        let client = client_for(&upstream);

        let err = client.search_places("coffee").await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn zero_results_maps_to_no_results() {
        let upstream = FakeUpstream::spawn().await;
        upstream.set_reply(Reply::json(serde_json::json!({"status": "ZERO_RESULTS", "results": []})));
        let client = client_for(&upstream);

        let err = client.search_places("nowhere").await.unwrap_err();
        assert!(matches!(err, Error::NoResults { .. }));
    }

    #[tokio::test]
    async fn denied_request_carries_upstream_message() {
        let upstream = FakeUpstream::spawn().await;
        upstream.set_reply(Reply::json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "routes": []
        })));
        let client = client_for(&upstream);

        let err = client
            .directions(&DirectionsQuery::new("A", "B", TravelMode::Driving))
            .await
            .unwrap_err();
        match err {
            Error::UpstreamStatus { status, message, .. } => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message.as_deref(), Some("The provided API key is invalid."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn ok_route_without_legs_maps_to_no_results() {
        let upstream = FakeUpstream::spawn().await;
        upstream.set_reply(Reply::json(serde_json::json!({
            "status": "OK",
            "routes": [{"summary": "A1", "legs": []}]
        })));
        let client = client_for(&upstream);

        let err = client
            .directions(&DirectionsQuery::new("A", "B", TravelMode::Driving))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoResults { endpoint: Endpoint::Directions }));
    }

    #[tokio::test]
    async fn transport_error_does_not_leak_the_key() {
        // Nothing listens on port 9 of the loopback interface.
        let client = MapsClient::new(
            MapsConfig::default()
                .with_api_key("very-secret-key")
                .with_base_url("http://127.0.0.1:9"),
        )
        .unwrap();

        let err = client.search_places("coffee").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        assert!(!err.to_string().contains("very-secret-key"));
    }
}
