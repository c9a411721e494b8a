//! Directions query types and normalization of the directions payload.
//!
//! The upstream payload is verbose: several alternative routes, each with
//! legs, steps, polylines and HTML-formatted instructions. Normalization keeps
//! only route 0 / leg 0 and flattens it into a summary, an ordered list of
//! plain-text steps, and the route warnings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::error;

use crate::error::{Error, Result};
use crate::html::strip_html;

pub(crate) const STATUS_OK: &str = "OK";

/// Upstream travel mode value that carries transit details.
pub const TRANSIT_TRAVEL_MODE: &str = "TRANSIT";

// ============================================================================
// QUERY
// ============================================================================

/// Means of transport used when computing directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Walking,
        TravelMode::Bicycling,
        TravelMode::Transit,
    ];

    /// Value sent as the `mode` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        TravelMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::invalid(
                    "mode",
                    format!(
                        "unknown travel mode '{}'. Valid: driving, walking, bicycling, transit",
                        wanted
                    ),
                )
            })
    }
}

/// Origin/destination pair for the directions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct DirectionsQuery {
    /// The starting point of the journey.
    pub origin: String,
    /// The endpoint of the journey.
    pub destination: String,
    /// The mode of transportation for the journey.
    pub mode: TravelMode,
}

impl DirectionsQuery {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, mode: TravelMode) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            mode,
        }
    }

    /// Reject queries the upstream cannot answer meaningfully.
    pub fn validate(&self) -> Result<()> {
        if self.origin.trim().is_empty() {
            return Err(Error::invalid("origin", "cannot be empty"));
        }
        if self.destination.trim().is_empty() {
            return Err(Error::invalid("destination", "cannot be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// UPSTREAM PAYLOAD
// ============================================================================

/// Treat an explicit JSON `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Raw body returned by the directions endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub routes: Vec<RawRoute>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRoute {
    /// Names of the main roads taken.
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub legs: Vec<RawLeg>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLeg {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_address: String,
    /// Only present for transit journeys.
    pub departure_time: Option<TimeText>,
    pub arrival_time: Option<TimeText>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStep {
    #[serde(default, deserialize_with = "null_as_default")]
    pub html_instructions: String,
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default, deserialize_with = "null_as_default")]
    pub travel_mode: String,
    pub transit_details: Option<RawTransitDetails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTransitDetails {
    pub departure_stop: Option<RawStop>,
    pub arrival_stop: Option<RawStop>,
    pub departure_time: Option<TimeText>,
    pub arrival_time: Option<TimeText>,
    pub headsign: Option<String>,
    pub line: Option<RawLine>,
    pub num_stops: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStop {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLine {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub vehicle: Option<RawVehicle>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVehicle {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Display text plus machine value, e.g. `{"text": "5.2 km", "value": 5213}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeText {
    pub text: Option<String>,
    pub time_zone: Option<String>,
    pub value: Option<i64>,
}

// ============================================================================
// NORMALIZED OUTPUT
// ============================================================================

/// Compact view of the first route/leg of a directions response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionsResult {
    pub summary: JourneySummary,
    pub steps: Vec<Step>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneySummary {
    pub total_distance: String,
    pub total_duration: String,
    pub start_address: String,
    pub end_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    pub summary_roads: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub instruction: String,
    pub distance: String,
    pub duration: String,
    pub travel_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_info: Option<TransitInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_stop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_stop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_stops: Option<u32>,
}

/// Flatten a directions payload into a [`DirectionsResult`].
///
/// Returns `None` (and logs why) when the status is not `OK`, when there is no
/// route, or when the first route has no legs. Additional routes and legs are
/// discarded.
pub fn normalize_directions(raw: DirectionsResponse) -> Option<DirectionsResult> {
    if raw.status != STATUS_OK {
        error!(status = %raw.status, "no valid routes found in the directions payload");
        return None;
    }

    let Some(route) = raw.routes.into_iter().next() else {
        error!("directions payload reported OK but contained no routes");
        return None;
    };

    let RawRoute {
        summary: summary_roads,
        legs,
        warnings,
    } = route;

    let Some(leg) = legs.into_iter().next() else {
        error!("first route in the directions payload has no legs");
        return None;
    };

    let summary = JourneySummary {
        total_distance: leg.distance.text,
        total_duration: leg.duration.text,
        start_address: leg.start_address,
        end_address: leg.end_address,
        departure_time: leg.departure_time.and_then(|t| t.text),
        arrival_time: leg.arrival_time.and_then(|t| t.text),
        summary_roads,
    };

    let steps = leg.steps.into_iter().map(normalize_step).collect();

    Some(DirectionsResult {
        summary,
        steps,
        warnings,
    })
}

fn normalize_step(step: RawStep) -> Step {
    let RawStep {
        html_instructions,
        distance,
        duration,
        travel_mode,
        transit_details,
    } = step;

    let transit_info = transit_details
        .filter(|_| travel_mode == TRANSIT_TRAVEL_MODE)
        .map(transit_info);

    Step {
        instruction: strip_html(&html_instructions),
        distance: distance.text,
        duration: duration.text,
        travel_mode,
        transit_info,
    }
}

fn transit_info(details: RawTransitDetails) -> TransitInfo {
    let (line, vehicle) = match details.line {
        Some(line) => (
            line.name.or(line.short_name),
            line.vehicle.and_then(|v| v.name),
        ),
        None => (None, None),
    };

    TransitInfo {
        departure_stop: details.departure_stop.and_then(|s| s.name),
        arrival_stop: details.arrival_stop.and_then(|s| s.name),
        departure_time: details.departure_time.and_then(|t| t.text),
        arrival_time: details.arrival_time.and_then(|t| t.text),
        line,
        vehicle,
        num_stops: details.num_stops,
    }
}
