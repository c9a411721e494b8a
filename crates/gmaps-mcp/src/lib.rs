//! MCP (Model Context Protocol) server for Google Maps
//!
//! Exposes place search and directions to AI assistants over stdio.
//!
//! # Architecture
//!
//! - `server`: rmcp handler, tool registration and stdio lifecycle
//! - `tools`: tool executors (user-query-fulfillment, transit-data-fetch)
//! - `types`: tool input types with JSON Schema
//! - `error`: error types and RFC 9457 problem details
//! - `logging`: stderr-only tracing setup
//!
//! # Transport
//!
//! JSON-RPC 2.0 over stdin/stdout. All logging is written to stderr so the
//! protocol stream stays clean.

pub mod error;
pub mod logging;
pub mod server;
pub mod tools;
pub mod types;

pub use error::{Error, Result};
pub use server::{run_stdio, MapsServer};
