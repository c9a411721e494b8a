//! `directions --from O --to D [--mode M]`: route between two places.

use anyhow::{Context, Result};
use gmaps_cli::OutputFormat;
use gmaps_lib::{DirectionsQuery, MapsClient, MapsConfig};

pub async fn handle_directions(
    config: MapsConfig,
    query: DirectionsQuery,
    format: OutputFormat,
) -> Result<()> {
    let client = MapsClient::new(config).context("failed to build the HTTP client")?;
    let result = client.directions(&query).await.with_context(|| {
        format!(
            "{} directions from '{}' to '{}' failed",
            query.mode, query.origin, query.destination
        )
    })?;

    print!("{}", format.render_directions(&result)?);
    Ok(())
}
