//! `search <QUERY>`: free-text place search.

use anyhow::{Context, Result};
use gmaps_cli::OutputFormat;
use gmaps_lib::{MapsClient, MapsConfig};

pub async fn handle_search(config: MapsConfig, query: &str, format: OutputFormat) -> Result<()> {
    let client = MapsClient::new(config).context("failed to build the HTTP client")?;
    let result = client
        .search_places(query)
        .await
        .with_context(|| format!("place search for '{}' failed", query))?;

    print!("{}", format.render_places(&result)?);
    Ok(())
}
