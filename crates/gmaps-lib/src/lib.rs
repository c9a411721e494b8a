//! Google Maps library entry points.
//!
//! This crate wraps two Google Maps web services, directions and place text
//! search, and reshapes their verbose JSON payloads into compact results that
//! are easy to read and serialize. Higher-level consumers (MCP server, CLI)
//! should only depend on the items exported here instead of reimplementing
//! behavior.
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a local fake upstream and recorded
//! payloads. Enable the `test-utils` feature to access it from dependent
//! crates.

pub mod client;
pub mod config;
pub mod directions;
pub mod error;
pub mod html;
pub mod places;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::{Endpoint, MapsClient};
pub use config::MapsConfig;
pub use directions::{
    normalize_directions, DirectionsQuery, DirectionsResponse, DirectionsResult, JourneySummary,
    Step, TransitInfo, TravelMode,
};
pub use error::{Error, Result};
pub use html::strip_html;
pub use places::{normalize_places, OpenStatus, Place, PlaceResult, PlacesResponse, Rating};
