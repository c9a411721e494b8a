use anyhow::Result;
use gmaps_lib::MapsConfig;
use gmaps_mcp::logging::{init_logging, LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging MUST go to stderr; stdout is the protocol stream.
    init_logging(&LoggingConfig::from_env())?;

    gmaps_mcp::run_stdio(MapsConfig::from_env()).await
}
