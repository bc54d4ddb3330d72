//! Daemon entry point for the USGS water MCP server.
//!
//! Loads configuration from the command line and environment, builds the
//! upstream client, and serves the MCP protocol over stdio and/or streamable
//! HTTP.

mod config;
mod logging;

use tokio::task::JoinSet;
use tracing::info;
use usgs_water_core::{UsgsClient, UsgsControlPlane};
use usgs_water_mcp::server::{serve_stdio, serve_streamable_http};

use crate::config::UsgsConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = UsgsConfig::from_args()?;
    logging::init(config.log_format)?;

    let client = UsgsClient::new(config.client_config())?;
    let control = UsgsControlPlane::new(client);
    let bases = control.client().bases();
    info!(
        water_services = %bases.water_services,
        flood_impacts = %bases.flood_impacts,
        ogc = %bases.ogc,
        "upstream APIs configured"
    );

    let mut servers = JoinSet::new();
    if config.mcp_serve {
        servers.spawn(serve_streamable_http(control.clone(), config.http_server_config()));
    }
    if config.enable_stdio {
        servers.spawn(serve_stdio(control));
    }

    while let Some(joined) = servers.join_next().await {
        joined??;
    }
    Ok(())
}
