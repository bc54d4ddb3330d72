use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ErrorCode},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use usgs_water_core::endpoints::{self, Endpoint, UpstreamApi};

use crate::{UsgsWaterMcp, helpers::mcp_err};

/// Parameters for `help`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpParams {
    /// Restrict the answer to one tool, e.g. "get_monitoring_locations".
    pub tool: Option<String>,
}

/// One catalog entry as reported by `help`.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpEntry {
    pub tool: String,
    pub upstream: String,
    pub path: String,
    pub summary: String,
}

/// Payload listing every upstream-backed tool.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCatalog {
    pub tools: Vec<HelpEntry>,
}

impl HelpCatalog {
    fn from_endpoints(list: &[Endpoint]) -> Self {
        let tools = list
            .iter()
            .map(|endpoint| HelpEntry {
                tool: endpoint.tool.to_string(),
                upstream: upstream_label(endpoint.api).to_string(),
                path: endpoint.path.to_string(),
                summary: endpoint.summary.to_string(),
            })
            .collect();
        Self { tools }
    }

    /// Catalog narrowed to a single tool, or `None` when the name is unknown.
    fn for_tool(name: &str) -> Option<Self> {
        endpoints::find(name.trim()).map(|endpoint| Self::from_endpoints(std::slice::from_ref(endpoint)))
    }
}

impl Default for HelpCatalog {
    fn default() -> Self {
        Self::from_endpoints(endpoints::ALL)
    }
}

const fn upstream_label(api: UpstreamApi) -> &'static str {
    match api {
        UpstreamApi::WaterServices => "NWIS instantaneous values",
        UpstreamApi::FloodImpacts => "Real-Time Flood Impacts",
        UpstreamApi::Ogc => "OGC API monitoring locations",
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl UsgsWaterMcp {
    #[tool(description = "List every USGS-backed tool with its upstream API, path template and purpose. Pass `tool` to describe just one.")]
    async fn help(
        &self,
        Parameters(params): Parameters<HelpParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let catalog = match params.tool.as_deref().filter(|name| !name.trim().is_empty()) {
            Some(name) => HelpCatalog::for_tool(name).ok_or_else(|| {
                mcp_err(ErrorCode::INVALID_PARAMS, format!("unknown tool `{name}`"))
            })?,
            None => HelpCatalog::default(),
        };
        Ok(CallToolResult::success(vec![Content::json(catalog)?]))
    }

    #[tool(description = "Describes NWIS site numbers, common parameter codes and time windows for fetch_usgs_data.")]
    async fn water_data_help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text(
r#"
1.  Sites are NWIS site numbers of 8 to 15 digits, e.g. `01646500` (Potomac River near Washington DC).
    Pass several as a comma-separated list: `01646500,01647000`.
    Site numbers can be discovered with `get_monitoring_locations` (field `monitoring_location_number`)
    or from a flood reference point via `get_reference_point_by_nwis_id`.
2.  Common parameter codes:
        00060 - Discharge, cubic feet per second
        00065 - Gage height, feet
        00010 - Water temperature, degrees Celsius
        00045 - Precipitation, inches
        00095 - Specific conductance
        00300 - Dissolved oxygen
        63680 - Turbidity
    Omit `parameter_codes` to receive every parameter the site reports.
3.  Time window (pick one):
        - nothing: the most recent value per parameter.
        - `period`: ISO-8601 duration back from now, e.g. `PT6H`, `P7D`.
        - `start_date` and/or `end_date`: `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM[:SS]`, optionally
          with an offset such as `-05:00`; without one NWIS uses the site's local time.
    `period` cannot be combined with `start_date`/`end_date`.
4.  `format` is `json` (WaterML as JSON, default) or `rdb` (tab-delimited text, returned under `data`).
5.  `site_status` filters by `all`, `active` or `inactive`.
"#
        )]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_endpoint() {
        let catalog = HelpCatalog::default();
        assert_eq!(catalog.tools.len(), endpoints::ALL.len());
        let crosswalk = catalog
            .tools
            .iter()
            .find(|entry| entry.tool == "get_nws_usgs_crosswalk")
            .expect("crosswalk entry");
        assert_eq!(crosswalk.upstream, "Real-Time Flood Impacts");
        assert_eq!(crosswalk.path, "nws_usgs");
    }

    #[test]
    fn catalog_narrows_to_one_tool() {
        let catalog = HelpCatalog::for_tool(" get_state_by_id ").expect("known tool");
        assert_eq!(catalog.tools.len(), 1);
        assert_eq!(catalog.tools[0].path, "states/{state_id}");
        assert!(HelpCatalog::for_tool("get_weather").is_none());
    }

    #[tokio::test]
    async fn help_rejects_unknown_tools() {
        let server = crate::tests::test_server(usgs_water_core::ClientConfig::default());
        let err = server
            .help(Parameters(HelpParams {
                tool: Some("get_weather".to_string()),
            }))
            .await
            .expect_err("unknown tool");
        assert_eq!(err.code.0, ErrorCode::INVALID_PARAMS.0);
    }
}
