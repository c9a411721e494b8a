//! Type definitions for MCP tool inputs
//!
//! Outputs are the normalized payloads from `gmaps-lib`, serialized as JSON
//! text content.

use gmaps_lib::DirectionsQuery;
use schemars::JsonSchema;
use serde::Deserialize;

/// Input for the `user-query-fulfillment` tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlaceSearchInput {
    /// The user's natural-language query used to find places, e.g. "pizza near Sydney Opera House".
    pub query: String,
}

/// Input for the `transit-data-fetch` tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TransitDataInput {
    /// The user's journey: origin, destination and mode of transportation.
    #[serde(rename = "userData")]
    pub user_data: DirectionsQuery,
}
