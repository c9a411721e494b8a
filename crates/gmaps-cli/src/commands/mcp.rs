//! `mcp`: serve the Google Maps tools over stdio.

use anyhow::Result;
use gmaps_lib::MapsConfig;
use gmaps_mcp::logging::{init_logging, LoggingConfig};

/// Install the stderr subscriber, with `--log-level` overriding `RUST_LOG`.
pub fn configure_logging(log_level: Option<&str>) -> Result<()> {
    let mut logging = LoggingConfig::from_env();
    if let Some(level) = log_level {
        logging = logging.with_level(level);
    }
    init_logging(&logging)
}

/// Run the MCP server until stdin closes.
pub async fn handle_mcp(config: MapsConfig) -> Result<()> {
    gmaps_mcp::run_stdio(config).await
}
