//! Google Maps CLI library.
//!
//! Output formatting shared by the `gmaps-cli` subcommands.

pub mod output;

pub use output::OutputFormat;
