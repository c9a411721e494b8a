//! MCP tool implementations
//!
//! - `user-query-fulfillment`: free-text place search
//! - `transit-data-fetch`: directions between two places for a travel mode
//!
//! Both are thin: validation, HTTP and normalization live in `gmaps-lib`,
//! and failures are converted to problem details here.

use gmaps_lib::{DirectionsResult, MapsClient, PlaceResult};
use tracing::{info, instrument, warn};

use crate::types::{PlaceSearchInput, TransitDataInput};
use crate::Error;

/// Place search tool handler
pub struct PlaceSearchTool;

impl PlaceSearchTool {
    pub const NAME: &'static str = "user-query-fulfillment";

    /// Search places matching `input.query`.
    #[instrument(name = "user-query-fulfillment", skip_all, fields(query = %input.query))]
    pub async fn execute(client: &MapsClient, input: PlaceSearchInput) -> crate::Result<PlaceResult> {
        match client.search_places(&input.query).await {
            Ok(result) => {
                info!(places = result.places.len(), "place search completed");
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "place search failed");
                Err(Error::from(e))
            }
        }
    }
}

/// Directions tool handler
pub struct TransitDataTool;

impl TransitDataTool {
    pub const NAME: &'static str = "transit-data-fetch";

    /// Fetch directions for `input.user_data`.
    #[instrument(
        name = "transit-data-fetch",
        skip_all,
        fields(
            origin = %input.user_data.origin,
            destination = %input.user_data.destination,
            mode = %input.user_data.mode,
        )
    )]
    pub async fn execute(
        client: &MapsClient,
        input: TransitDataInput,
    ) -> crate::Result<DirectionsResult> {
        match client.directions(&input.user_data).await {
            Ok(result) => {
                info!(steps = result.steps.len(), "directions completed");
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "directions failed");
                Err(Error::from(e))
            }
        }
    }
}
