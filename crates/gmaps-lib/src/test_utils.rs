//! Local stand-in for the Google Maps web services.
//!
//! [`FakeUpstream`] binds an `axum` server to an ephemeral loopback port,
//! answers the directions and text-search paths with the recorded payloads in
//! `docs/fixtures/`, and records every request it receives so tests can assert
//! on the query string that was sent.
//!
//! # Usage
//!
//! ```ignore
//! use gmaps_lib::test_utils::{FakeUpstream, Reply};
//!
//! #[tokio::test]
//! async fn search() {
//!     let upstream = FakeUpstream::spawn().await;
//!     let config = MapsConfig::default()
//!         .with_api_key("test-key")
//!         .with_base_url(upstream.base_url());
//!     // ... exercise the client
//!     assert_eq!(upstream.requests()[0].param("key"), Some("test-key"));
//! }
//! ```

use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;

const PLACES_FIXTURE: &str = include_str!("../../../docs/fixtures/places_text_search.json");
const DIRECTIONS_FIXTURE: &str = include_str!("../../../docs/fixtures/directions_transit.json");

/// Recorded text-search payload (three places, with a next-page token).
pub fn places_fixture() -> Value {
    serde_json::from_str(PLACES_FIXTURE).expect("places fixture is valid JSON")
}

/// Recorded transit directions payload (walk, tram, walk; two routes).
pub fn directions_fixture() -> Value {
    serde_json::from_str(DIRECTIONS_FIXTURE).expect("directions fixture is valid JSON")
}

/// A request as seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Decoded value of the first query parameter named `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Canned response overriding the fixture replies.
#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: String,
}

impl Reply {
    /// `200 OK` with a JSON body.
    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    /// Arbitrary status with a raw body.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Default)]
struct Recorder {
    reply: Option<Reply>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<Recorder>>;

/// Fake Google Maps API bound to `127.0.0.1:<ephemeral>`.
pub struct FakeUpstream {
    base_url: String,
    state: Shared,
}

impl FakeUpstream {
    /// Start the server on the current tokio runtime.
    pub async fn spawn() -> Self {
        let state: Shared = Arc::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener has an address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Value for `MapsConfig::with_base_url`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer every subsequent request with `reply`.
    pub fn set_reply(&self, reply: Reply) {
        self.state.lock().expect("recorder lock").reply = Some(reply);
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().expect("recorder lock").requests.clone()
    }
}

async fn handle(
    State(state): State<Shared>,
    uri: Uri,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let reply = {
        let mut recorder = state.lock().expect("recorder lock");
        recorder.requests.push(RecordedRequest {
            path: uri.path().to_string(),
            params,
        });
        recorder.reply.clone()
    };

    let reply = reply.unwrap_or_else(|| match uri.path() {
        "/place/textsearch/json" => Reply::status(200, PLACES_FIXTURE),
        "/directions/json" => Reply::status(200, DIRECTIONS_FIXTURE),
        _ => Reply::status(404, "not found"),
    });

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json; charset=UTF-8")],
        reply.body,
    )
        .into_response()
}
