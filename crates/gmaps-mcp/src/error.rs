//! Error types and RFC 9457-style problem details for the MCP server
//!
//! Every failed tool call is answered with one of these serialized as the
//! text content of an error result, so callers can tell "no results" apart
//! from bad input, a missing credential, or an upstream failure.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Tool-level result; the error side becomes an `isError` tool response.
pub type Result<T> = std::result::Result<T, Error>;

const PROBLEM_BASE: &str = "https://mcp-maps.local/errors";

/// Problem body returned in the text content of a failed tool call.
///
/// Serializes to `{"code", "message", "type"?, "context"?}`.
#[derive(Debug, Error, Serialize, Deserialize, Clone)]
#[error("{message}")]
pub struct Error {
    /// Failure class borrowed from HTTP: 400 bad input, 404 nothing found,
    /// 502 upstream failure, 503 missing credential, 500 anything else.
    pub code: i32,

    /// One-line summary safe to show to the caller.
    pub message: String,

    /// URI under `PROBLEM_BASE` naming the failure class.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Structured details such as the offending field or upstream status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl Error {
    fn problem(code: i32, slug: &str, message: String, context: Option<Value>) -> Self {
        Self {
            code,
            message,
            kind: Some(format!("{}/{}", PROBLEM_BASE, slug)),
            context,
        }
    }

    /// A tool argument failed validation.
    pub fn invalid_param(param: impl Into<String>, reason: impl Into<String>) -> Self {
        let param = param.into();
        let reason = reason.into();
        Self::problem(
            400,
            "invalid-parameter",
            format!("{} {}", param, reason),
            Some(json!({ "parameter": param, "reason": reason })),
        )
    }

    /// `GOOGLE_MAPS_API_KEY` (or `variable`) is unset.
    pub fn missing_credential(variable: &str) -> Self {
        Self::problem(
            503,
            "missing-credential",
            format!("{} is not configured", variable),
            Some(json!({
                "variable": variable,
                "hint": "set it in the server environment and restart"
            })),
        )
    }

    pub fn no_results(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self::problem(
            404,
            "no-results",
            format!("No results from {}", endpoint),
            Some(json!({
                "endpoint": endpoint,
                "hint": "try a broader query or another travel mode"
            })),
        )
    }

    /// The Google Maps request failed at the transport, HTTP or API level.
    pub fn upstream(reason: impl Into<String>, context: Value) -> Self {
        Self::problem(
            502,
            "upstream-failure",
            format!("Upstream request failed: {}", reason.into()),
            Some(context),
        )
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::problem(
            500,
            "internal-error",
            format!("Internal error: {}", reason.into()),
            None,
        )
    }

    /// Serialized problem, falling back to the bare message.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }
}

impl From<gmaps_lib::Error> for Error {
    fn from(err: gmaps_lib::Error) -> Self {
        use gmaps_lib::Error as LibError;

        match err {
            LibError::MissingApiKey => Self::missing_credential(gmaps_lib::config::API_KEY_ENV),
            LibError::InvalidQuery { field, reason } => Self::invalid_param(field, reason),
            LibError::NoResults { endpoint } => Self::no_results(endpoint.to_string()),
            LibError::UpstreamHttp { endpoint, status } => Self::upstream(
                format!("{} answered HTTP {}", endpoint, status),
                json!({ "endpoint": endpoint.to_string(), "http_status": status }),
            ),
            LibError::UpstreamStatus {
                endpoint,
                status,
                message,
            } => Self::upstream(
                format!("{} returned status {}", endpoint, status),
                json!({
                    "endpoint": endpoint.to_string(),
                    "status": status,
                    "upstream_message": message
                }),
            ),
            LibError::Decode { endpoint, source } => Self::upstream(
                format!("{} response could not be decoded", endpoint),
                json!({ "endpoint": endpoint.to_string(), "reason": source.to_string() }),
            ),
            LibError::Http(e) => {
                let reason = if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    e.to_string()
                };
                Self::upstream(reason, json!({ "transport": true }))
            }
        }
    }
}
