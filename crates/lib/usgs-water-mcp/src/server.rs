//! Transport runners: stdio for local clients, streamable HTTP for remote ones.
//!
//! The HTTP listener mounts the MCP service under a configurable path and
//! answers `/health` with the upstream APIs this instance talks to.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use serde::Serialize;
use tracing::info;
use usgs_water_core::{BaseUrls, UsgsControlPlane};

use crate::UsgsWaterMcp;

pub const DEFAULT_MCP_PATH: &str = "/mcp";
const HEALTH_PATH: &str = "/health";

/// Settings for the streamable HTTP listener.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub addr: SocketAddr,
    pub mcp_path: String,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
}

impl HttpTransportConfig {
    #[must_use]
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            mcp_path: DEFAULT_MCP_PATH.to_string(),
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
        }
    }

    /// Sets the mount path. Callers pass a value accepted by [`normalize_mcp_path`].
    #[must_use]
    pub fn with_mcp_path(mut self, mcp_path: impl Into<String>) -> Self {
        self.mcp_path = mcp_path.into();
        self
    }

    #[must_use]
    pub const fn with_stateful_mode(mut self, stateful_mode: bool) -> Self {
        self.stateful_mode = stateful_mode;
        self
    }

    #[must_use]
    pub const fn with_sse_keep_alive(mut self, sse_keep_alive: Option<Duration>) -> Self {
        self.sse_keep_alive = sse_keep_alive;
        self
    }
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 4030)))
    }
}

/// Normalises a mount path to `/segment[/segment]` form.
///
/// Returns `None` for the root and for the health route, which the MCP
/// service may not shadow.
#[must_use]
pub fn normalize_mcp_path(path: &str) -> Option<String> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() || trimmed.split('/').any(str::is_empty) {
        return None;
    }
    let normalized = format!("/{trimmed}");
    (normalized != HEALTH_PATH).then_some(normalized)
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub upstreams: UpstreamReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamReport {
    pub water_services: String,
    pub flood_impacts: String,
    pub ogc: String,
}

impl HealthReport {
    #[must_use]
    pub fn for_bases(bases: &BaseUrls) -> Self {
        Self {
            status: "ok",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            upstreams: UpstreamReport {
                water_services: bases.water_services.to_string(),
                flood_impacts: bases.flood_impacts.to_string(),
                ogc: bases.ogc.to_string(),
            },
        }
    }
}

async fn health(State(report): State<HealthReport>) -> Json<HealthReport> {
    Json(report)
}

/// Serves MCP over stdio until the client disconnects.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio(
    control: UsgsControlPlane,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service = UsgsWaterMcp::new(control);
    info!("usgs-water-mcp serving on stdio");
    let running = serve_server(service, stdio()).await?;
    let quit = running.waiting().await?;
    info!(reason = ?quit, "stdio session ended");
    Ok(())
}

/// Builds the HTTP router: the MCP service at `config.mcp_path` plus `/health`.
#[must_use]
pub fn http_router(control: UsgsControlPlane, config: &HttpTransportConfig) -> Router {
    let report = HealthReport::for_bases(control.client().bases());
    let service: StreamableHttpService<UsgsWaterMcp, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(UsgsWaterMcp::new(control.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                sse_keep_alive: config.sse_keep_alive,
                sse_retry: config.sse_retry,
                stateful_mode: config.stateful_mode,
                ..Default::default()
            },
        );

    Router::new()
        .route(HEALTH_PATH, get(health))
        .with_state(report)
        .nest_service(&config.mcp_path, service)
}

/// Serves MCP over streamable HTTP until the listener fails.
///
/// # Errors
/// Returns any bind or server error.
pub async fn serve_streamable_http(
    control: UsgsControlPlane,
    config: HttpTransportConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = http_router(control, &config);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(
        addr = %listener.local_addr()?,
        path = %config.mcp_path,
        stateful = config.stateful_mode,
        "usgs-water-mcp listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
