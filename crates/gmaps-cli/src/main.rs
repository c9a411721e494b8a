mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gmaps_cli::OutputFormat;
use gmaps_lib::{DirectionsQuery, MapsConfig, TravelMode};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(author, version, about = "Google Maps place search and directions")]
struct Cli {
    /// Google Maps API key. Overrides GOOGLE_MAPS_API_KEY.
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// API root URL. Overrides GOOGLE_MAPS_API_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output format for search and directions.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for places matching a free-text query.
    Search {
        /// What to look for, e.g. "pizza near Circular Quay".
        query: String,
    },
    /// Get directions between two places.
    Directions {
        /// Starting point.
        #[arg(long = "from")]
        from: String,
        /// Destination.
        #[arg(long = "to")]
        to: String,
        /// driving, walking, bicycling or transit.
        #[arg(long, default_value_t = TravelMode::Driving)]
        mode: TravelMode,
    },
    /// Serve the Google Maps tools over MCP on stdin/stdout.
    Mcp {
        /// Log filter directive (e.g. "debug"). Overrides RUST_LOG.
        #[arg(long)]
        log_level: Option<String>,
    },
}

impl Cli {
    fn maps_config(&self) -> MapsConfig {
        let mut config = MapsConfig::from_env();
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logging first so configuration warnings are not lost.
    match &cli.command {
        Command::Mcp { log_level } => commands::mcp::configure_logging(log_level.as_deref())?,
        _ => init_tracing(),
    }
    let config = cli.maps_config();

    match cli.command {
        Command::Search { query } => {
            commands::search::handle_search(config, &query, cli.format).await
        }
        Command::Directions { from, to, mode } => {
            let query = DirectionsQuery::new(from, to, mode);
            commands::directions::handle_directions(config, query, cli.format).await
        }
        Command::Mcp { .. } => commands::mcp::handle_mcp(config).await,
    }
}

/// One-shot commands only log warnings and above unless RUST_LOG says otherwise.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
