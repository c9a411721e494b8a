//! Runtime configuration for talking to the Google Maps web services.
//!
//! Values are read from the process environment:
//!
//! - `GOOGLE_MAPS_API_KEY`: API key appended to every request (required for
//!   calls to succeed, but its absence does not prevent startup)
//! - `GOOGLE_MAPS_API_BASE_URL`: override for the API root, mainly for tests
//! - `GOOGLE_MAPS_TIMEOUT_SECS`: per-request timeout (default: 30)

use std::time::Duration;

use tracing::warn;

pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
pub const BASE_URL_ENV: &str = "GOOGLE_MAPS_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "GOOGLE_MAPS_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings shared by every request issued by [`crate::MapsClient`].
#[derive(Clone)]
pub struct MapsConfig {
    /// API key; `None` when unset or blank.
    pub api_key: Option<String>,
    /// API root without a trailing slash, e.g. `https://maps.googleapis.com/maps/api`.
    pub base_url: String,
    /// Timeout applied to each upstream request.
    pub timeout: Duration,
    /// `User-Agent` header sent upstream.
    pub user_agent: String,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

impl std::fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl MapsConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Tests pass a closure over a fixed map so they never touch the global
    /// environment and can run in parallel.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup(API_KEY_ENV) {
            config = config.with_api_key(key);
        }

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(
                    value = %raw,
                    "ignoring invalid {}, using {}s",
                    TIMEOUT_ENV,
                    DEFAULT_TIMEOUT.as_secs()
                ),
            }
        }

        config
    }

    /// Replace the API key. Blank keys are treated as missing.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        let key = key.trim();
        self.api_key = if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        };
        self
    }

    /// Replace the API root. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether an API key is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn default_user_agent() -> String {
    format!("mcp-maps/{}", env!("CARGO_PKG_VERSION"))
}
