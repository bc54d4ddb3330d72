//! HTTP client for the upstream USGS APIs.

use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use crate::endpoints::{ResponseShape, UpstreamApi};
use crate::error::{ToolError, ToolResult};
use crate::request::ApiRequest;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_ERROR_BODY_BYTES: usize = 2048;

/// Body returned to the caller: parsed JSON, or the raw text when it is not JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Json(Value),
    Text(String),
}

/// Re-shapes an upstream body for the caller.
#[must_use]
pub fn shape_body(shape: ResponseShape, body: String) -> Payload {
    match shape {
        ResponseShape::TextEnvelope => Payload::Json(json!({ "data": body })),
        ResponseShape::Json => match serde_json::from_str::<Value>(&body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(body),
        },
        ResponseShape::JsonObject => match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(items)) => {
                let count = items.len();
                Payload::Json(json!({ "items": items, "count": count }))
            }
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(body),
        },
    }
}

/// Parses a base URL, requiring an absolute `http`/`https` URL that can carry a path.
///
/// # Errors
/// Returns `InvalidBaseUrl` for anything else.
pub fn parse_base_url(value: &str) -> ToolResult<Url> {
    let url = Url::parse(value.trim()).map_err(|err| ToolError::InvalidBaseUrl(format!("{value}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ToolError::InvalidBaseUrl(value.to_string()));
    }
    Ok(url)
}

/// Base URL per upstream API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
    pub water_services: Url,
    pub flood_impacts: Url,
    pub ogc: Url,
}

impl BaseUrls {
    #[must_use]
    pub const fn for_api(&self, api: UpstreamApi) -> &Url {
        match api {
            UpstreamApi::WaterServices => &self.water_services,
            UpstreamApi::FloodImpacts => &self.flood_impacts,
            UpstreamApi::Ogc => &self.ogc,
        }
    }

    #[must_use]
    pub fn with_base(mut self, api: UpstreamApi, url: Url) -> Self {
        match api {
            UpstreamApi::WaterServices => self.water_services = url,
            UpstreamApi::FloodImpacts => self.flood_impacts = url,
            UpstreamApi::Ogc => self.ogc = url,
        }
        self
    }
}

impl Default for BaseUrls {
    fn default() -> Self {
        let parse = |api: UpstreamApi| {
            Url::parse(api.default_base_url()).expect("valid default base URL")
        };
        Self {
            water_services: parse(UpstreamApi::WaterServices),
            flood_impacts: parse(UpstreamApi::FloodImpacts),
            ogc: parse(UpstreamApi::Ogc),
        }
    }
}

/// Configuration for the upstream HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub bases: BaseUrls,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    #[must_use]
    pub fn new(bases: BaseUrls) -> Self {
        Self {
            bases,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("usgs-water-mcp/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(BaseUrls::default())
    }
}

/// Issues the single GET behind each tool call.
#[derive(Debug, Clone)]
pub struct UsgsClient {
    http: reqwest::Client,
    bases: BaseUrls,
}

impl UsgsClient {
    /// Builds a client with its own connection pool.
    ///
    /// # Errors
    /// Returns the reqwest builder error (e.g. TLS backend initialisation).
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;
        Ok(Self {
            http,
            bases: config.bases,
        })
    }

    #[must_use]
    pub const fn bases(&self) -> &BaseUrls {
        &self.bases
    }

    /// Executes a request and re-shapes the body.
    ///
    /// # Errors
    /// Returns `Transport` when no response arrives and `UpstreamStatus` for a
    /// non-success status.
    pub async fn execute(&self, request: &ApiRequest) -> ToolResult<Payload> {
        let url = request.url(&self.bases)?;
        let tool = request.tool();
        debug!(tool, %url, "upstream request");
        let started = Instant::now();

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| transport_error(tool, &url, err))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| transport_error(tool, &url, err))?;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        if !status.is_success() {
            warn!(tool, %url, status = status.as_u16(), elapsed_ms, "upstream returned an error status");
            return Err(ToolError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
                body: truncate(body.trim(), MAX_ERROR_BODY_BYTES).to_string(),
            });
        }

        debug!(tool, status = status.as_u16(), elapsed_ms, bytes = body.len(), "upstream response");
        Ok(shape_body(request.shape, body))
    }
}

fn transport_error(tool: &str, url: &Url, err: reqwest::Error) -> ToolError {
    warn!(tool, %url, error = %err, "upstream request failed");
    ToolError::Transport {
        url: url.to_string(),
        source: Box::new(err),
    }
}

fn truncate(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
