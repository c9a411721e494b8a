//! Output formatting for place and directions results.
//!
//! `text` is meant for people at a terminal; `json` prints the normalized
//! payload exactly as the MCP tools return it, pretty-printed.

use std::fmt::Write as _;

use clap::ValueEnum;
use gmaps_lib::{DirectionsResult, Place, PlaceResult, Rating, TransitInfo};
use serde::Serialize;

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn render_places(self, result: &PlaceResult) -> anyhow::Result<String> {
        match self {
            OutputFormat::Text => Ok(places_text(result)),
            OutputFormat::Json => render_json(result),
        }
    }

    pub fn render_directions(self, result: &DirectionsResult) -> anyhow::Result<String> {
        match self {
            OutputFormat::Text => Ok(directions_text(result)),
            OutputFormat::Json => render_json(result),
        }
    }
}

fn render_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

fn rating_text(place: &Place) -> String {
    match place.rating {
        Rating::Score(score) => format!("{:.1} ({} ratings)", score, place.total_ratings),
        Rating::NotRated => gmaps_lib::places::NOT_RATED.to_string(),
    }
}

/// Numbered list of places.
pub fn places_text(result: &PlaceResult) -> String {
    if result.places.is_empty() {
        return "No places found.\n".to_string();
    }

    let mut out = String::new();
    for (index, place) in result.places.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", index + 1, place.name);
        let _ = writeln!(out, "    {}", place.address);

        let mut status = format!("{} | {}", rating_text(place), place.is_open.label());
        if !place.is_operational {
            status.push_str(" | not operational");
        }
        let _ = writeln!(out, "    {}", status);

        if let Some(link) = &place.link {
            let _ = writeln!(out, "    {}", link);
        }
    }

    if let Some(token) = &result.next_page_token {
        let _ = writeln!(out, "\nMore results available (page token: {})", token);
    }

    out
}

fn transit_line(info: &TransitInfo) -> String {
    let mut line = String::new();
    match (&info.vehicle, &info.line) {
        (Some(vehicle), Some(name)) => line.push_str(&format!("{} {}", vehicle, name)),
        (Some(only), None) | (None, Some(only)) => line.push_str(only),
        (None, None) => line.push_str("Transit"),
    }

    let from = info.departure_stop.as_deref().unwrap_or("?");
    let to = info.arrival_stop.as_deref().unwrap_or("?");
    match (&info.departure_time, &info.arrival_time) {
        (Some(dep), Some(arr)) => {
            let _ = write!(line, ": {} {} -> {} {}", from, dep, to, arr);
        }
        _ => {
            let _ = write!(line, ": {} -> {}", from, to);
        }
    }

    if let Some(stops) = info.num_stops {
        let _ = write!(line, " ({} stops)", stops);
    }
    line
}

/// Summary block, numbered steps and warnings.
pub fn directions_text(result: &DirectionsResult) -> String {
    let summary = &result.summary;
    let mut out = String::new();

    let _ = writeln!(out, "{} -> {}", summary.start_address, summary.end_address);
    let _ = writeln!(
        out,
        "Distance: {}  Duration: {}",
        summary.total_distance, summary.total_duration
    );
    if let (Some(dep), Some(arr)) = (&summary.departure_time, &summary.arrival_time) {
        let _ = writeln!(out, "Departure: {}  Arrival: {}", dep, arr);
    }
    if !summary.summary_roads.is_empty() {
        let _ = writeln!(out, "Via: {}", summary.summary_roads);
    }

    let _ = writeln!(out, "\nSteps:");
    for (index, step) in result.steps.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} ({}, {})",
            index + 1,
            step.instruction,
            step.distance,
            step.duration
        );
        if let Some(info) = &step.transit_info {
            let _ = writeln!(out, "     {}", transit_line(info));
        }
    }

    if !result.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings:");
        for warning in &result.warnings {
            let _ = writeln!(out, "  - {}", warning);
        }
    }

    out
}
