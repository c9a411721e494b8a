//! MCP server handler and stdio lifecycle
//!
//! [`MapsServer`] registers the two tools with the rmcp router and turns
//! their results into text content. Tool failures are reported in-band as
//! error results carrying a problem-details JSON body; only malformed
//! arguments surface as JSON-RPC errors.

use std::sync::Arc;

use gmaps_lib::{MapsClient, MapsConfig};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Serialize;
use tracing::{error, info};

use crate::tools::{PlaceSearchTool, TransitDataTool};
use crate::types::{PlaceSearchInput, TransitDataInput};
use crate::Error;

/// Name advertised in the `initialize` response.
pub const SERVER_NAME: &str = "mcp-maps";

/// Human-readable description advertised in the `initialize` response.
pub const SERVER_DESCRIPTION: &str = "A Model Context Protocol server for Google Maps.";

/// Google Maps MCP service
///
/// Cheap to clone; the HTTP client and configuration are shared.
#[derive(Clone)]
pub struct MapsServer {
    client: Arc<MapsClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MapsServer {
    pub fn new(client: MapsClient) -> Self {
        Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        }
    }

    /// Build the HTTP client from `config` and wrap it.
    pub fn from_config(config: MapsConfig) -> crate::Result<Self> {
        let client = MapsClient::new(config).map_err(Error::from)?;
        Ok(Self::new(client))
    }

    #[tool(
        name = "user-query-fulfillment",
        description = "Search Google Maps for places matching a natural-language query. \
                       Returns name, address, rating, opening status and a Maps link for each place."
    )]
    async fn user_query_fulfillment(
        &self,
        Parameters(input): Parameters<PlaceSearchInput>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(PlaceSearchTool::execute(&self.client, input).await))
    }

    #[tool(
        name = "transit-data-fetch",
        description = "Get directions between an origin and a destination for a travel mode \
                       (driving, walking, bicycling or transit). Returns a journey summary, \
                       step-by-step instructions with transit details, and route warnings."
    )]
    async fn transit_data_fetch(
        &self,
        Parameters(input): Parameters<TransitDataInput>,
    ) -> Result<CallToolResult, McpError> {
        Ok(respond(TransitDataTool::execute(&self.client, input).await))
    }
}

#[tool_handler]
impl ServerHandler for MapsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            instructions: Some(SERVER_DESCRIPTION.into()),
            ..Default::default()
        }
    }
}

/// Serialize a tool outcome as text content.
fn respond<T: Serialize>(outcome: crate::Result<T>) -> CallToolResult {
    let body = outcome.and_then(|value| {
        serde_json::to_string(&value).map_err(|e| Error::internal(e.to_string()))
    });

    match body {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(problem) => CallToolResult::error(vec![Content::text(problem.to_json())]),
    }
}

/// Serve the tools on stdin/stdout until the client disconnects.
pub async fn run_stdio(config: MapsConfig) -> anyhow::Result<()> {
    let server = MapsServer::from_config(config)?;

    info!(name = SERVER_NAME, "starting MCP server on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!(error = %e, "failed to start MCP service");
    })?;

    let reason = service.waiting().await?;
    info!(?reason, "MCP server stopped");
    Ok(())
}
