//! MCP server implementation for usgs-water-mcp.
//!
//! This crate wires the control plane into rmcp tool handlers, one router per
//! upstream API, and exposes the stdio and streamable HTTP runners.

mod helpers;
mod tools;
pub mod server;

use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use usgs_water_core::UsgsControlPlane;

pub use tools::flood_impact::{NwisIdParams, NwsIdParams, ReferencePointIdParams, ReferencePointsParams, StateIdParams};
pub use tools::ogc::{CollectionPageParams, LocationIdParams, MonitoringLocationsParams};
pub use tools::water_data::FetchUsgsDataParams;

const SERVER_INSTRUCTIONS: &str = r"usgs-water-mcp exposes public USGS water APIs as tools. Every tool issues one GET and returns the upstream JSON.

Upstreams:
1. NWIS instantaneous values (waterservices.usgs.gov/nwis/iv):
   - `fetch_usgs_data` with `sites` (comma-separated 8-15 digit site numbers) and optional
     `parameter_codes`, `start_date`/`end_date` or `period` (ISO-8601, e.g. P7D), `format`, `site_status`.
2. Real-Time Flood Impacts (api.waterdata.usgs.gov/rtfi-api):
   - `get_flooding_reference_points`, `get_reference_points` (page/limit), `get_reference_point_by_id`,
     `get_reference_points_by_state`, `get_reference_point_by_nwis_id`, `get_reference_points_by_nws_id`,
     `get_inactive_reference_points`, `get_states`, `get_state_by_id`, `get_counties`,
     `get_counties_by_state`, `get_nws_usgs_crosswalk`.
3. OGC API (api.waterdata.usgs.gov/ogcapi/v0):
   - `get_monitoring_locations` (bbox, limit/offset, agency/state/county/site type filters),
     `get_monitoring_location_by_id` (e.g. USGS-01646500), and the code lists `get_agency_codes`,
     `get_altitude_datums`, `get_aquifer_codes`, `get_aquifer_types`, `get_coordinate_accuracy_codes`.

Notes:
- List responses from the flood impacts and OGC APIs arrive as `{ items, count }` when the upstream returns a bare array.
- Pagination is passed through; call again with the next `page` or `offset` to continue.
- Upstream failures come back as error results carrying the HTTP status and body.
- Use `help` for the endpoint catalog and `water_data_help` for common parameter codes.
- `health` returns `ok`.";

/// MCP server wrapper around the control plane and tool routers.
#[derive(Clone)]
pub struct UsgsWaterMcp {
    tool_router: ToolRouter<Self>,
    control: UsgsControlPlane,
}

impl UsgsWaterMcp {
    #[must_use]
    pub fn new(control: UsgsControlPlane) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_context()
            + Self::tool_router_water_data()
            + Self::tool_router_flood_impact()
            + Self::tool_router_ogc();
        Self {
            tool_router,
            control,
        }
    }

    /// Names of every registered tool.
    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl UsgsWaterMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for UsgsWaterMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use usgs_water_core::{ClientConfig, UsgsClient, endpoints};

    use super::*;

    pub(crate) fn test_server(config: ClientConfig) -> UsgsWaterMcp {
        let client = UsgsClient::new(config).expect("client should build");
        UsgsWaterMcp::new(UsgsControlPlane::new(client))
    }

    #[test]
    fn every_catalog_endpoint_is_a_tool() {
        let server = test_server(ClientConfig::default());
        let names: BTreeSet<String> = server.tool_names().into_iter().collect();

        for endpoint in endpoints::ALL {
            assert!(names.contains(endpoint.tool), "missing tool {}", endpoint.tool);
        }
        for extra in ["health", "help", "water_data_help"] {
            assert!(names.contains(extra), "missing tool {extra}");
        }
        assert_eq!(names.len(), endpoints::ALL.len() + 3);
    }

    #[test]
    fn server_info_advertises_tools() {
        let info = test_server(ClientConfig::default()).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info
            .instructions
            .as_deref()
            .is_some_and(|text| text.contains("fetch_usgs_data")));
    }
}
