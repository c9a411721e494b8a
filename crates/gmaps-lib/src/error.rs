use thiserror::Error;

use crate::client::Endpoint;

/// Convenient result alias for the maps library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was configured, so upstream requests cannot be authenticated.
    #[error("GOOGLE_MAPS_API_KEY is not set; requests to the Google Maps API cannot be authenticated")]
    MissingApiKey,

    /// Raised when a caller-supplied query field is empty or malformed.
    #[error("invalid {field}: {reason}")]
    InvalidQuery { field: &'static str, reason: String },

    /// The upstream answered with a non-success HTTP status.
    #[error("{endpoint} request failed with HTTP status {status}")]
    UpstreamHttp { endpoint: Endpoint, status: u16 },

    /// The upstream answered, but its API-level status reports a failure
    /// (for example `REQUEST_DENIED` or `INVALID_REQUEST`).
    #[error("{endpoint} returned status {status}{}", format_message(.message))]
    UpstreamStatus {
        endpoint: Endpoint,
        status: String,
        message: Option<String>,
    },

    /// The upstream had nothing usable for the query.
    #[error("{endpoint} returned no results")]
    NoResults { endpoint: Endpoint },

    /// The response body did not match the expected payload shape.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    /// Wrapper for HTTP client errors. The request URL is stripped because it
    /// carries the API key.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidQuery {
            field,
            reason: reason.into(),
        }
    }
}

fn format_message(message: &Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => format!(": {}", message),
        _ => String::new(),
    }
}
