use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use usgs_water_core::control::ReferencePointsPage;

use crate::{UsgsWaterMcp, helpers};

/// Parameters for paging through reference points.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ReferencePointsParams {
    /// Page number, starting at 1 (default 1).
    pub page: Option<u32>,
    /// Results per page (default 100).
    pub limit: Option<u32>,
}

/// Parameters for fetching a reference point by id.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ReferencePointIdParams {
    /// The reference point id.
    pub reference_point_id: String,
}

/// Parameters for state-scoped lookups.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct StateIdParams {
    /// State id (e.g. "CA", "TX").
    pub state_id: String,
}

/// Parameters for fetching a reference point by USGS gage id.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct NwisIdParams {
    /// USGS National Water Information System site id.
    pub nwis_id: String,
}

/// Parameters for fetching reference points by NWS location id.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct NwsIdParams {
    /// National Weather Service location id.
    pub nws_id: String,
}

#[tool_router(router = tool_router_flood_impact, vis = "pub")]
impl UsgsWaterMcp {
    #[tool(description = "Get currently flooding reference points from the USGS Real-Time Flood Impacts API.")]
    async fn get_flooding_reference_points(&self) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.flooding_reference_points().await)
    }

    #[tool(description = "Get a paginated list of reference points from the USGS Real-Time Flood Impacts API.")]
    async fn get_reference_points(
        &self,
        Parameters(params): Parameters<ReferencePointsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let page = ReferencePointsPage {
            page: params.page,
            limit: params.limit,
        };
        helpers::tool_result(self.control.reference_points(page).await)
    }

    #[tool(description = "Get a specific reference point by id from the USGS Real-Time Flood Impacts API.")]
    async fn get_reference_point_by_id(
        &self,
        Parameters(params): Parameters<ReferencePointIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.reference_point(&params.reference_point_id).await)
    }

    #[tool(description = "Get reference points for a state from the USGS Real-Time Flood Impacts API.")]
    async fn get_reference_points_by_state(
        &self,
        Parameters(params): Parameters<StateIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.reference_points_by_state(&params.state_id).await)
    }

    #[tool(description = "Get the reference point for a USGS gage id from the USGS Real-Time Flood Impacts API.")]
    async fn get_reference_point_by_nwis_id(
        &self,
        Parameters(params): Parameters<NwisIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.reference_point_by_nwis_id(&params.nwis_id).await)
    }

    #[tool(description = "Get reference points for a National Weather Service id from the USGS Real-Time Flood Impacts API.")]
    async fn get_reference_points_by_nws_id(
        &self,
        Parameters(params): Parameters<NwsIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.reference_points_by_nws_id(&params.nws_id).await)
    }

    #[tool(description = "Get inactive reference points from the USGS Real-Time Flood Impacts API.")]
    async fn get_inactive_reference_points(&self) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.inactive_reference_points().await)
    }

    #[tool(description = "Get the list of states from the USGS Real-Time Flood Impacts API.")]
    async fn get_states(&self) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.states().await)
    }

    #[tool(description = "Get a specific state from the USGS Real-Time Flood Impacts API.")]
    async fn get_state_by_id(
        &self,
        Parameters(params): Parameters<StateIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.state(&params.state_id).await)
    }

    #[tool(description = "Get the list of counties from the USGS Real-Time Flood Impacts API.")]
    async fn get_counties(&self) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.counties().await)
    }

    #[tool(description = "Get counties for a state from the USGS Real-Time Flood Impacts API.")]
    async fn get_counties_by_state(
        &self,
        Parameters(params): Parameters<StateIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.counties_by_state(&params.state_id).await)
    }

    #[tool(description = "Get NWS/USGS crosswalk data from the USGS Real-Time Flood Impacts API.")]
    async fn get_nws_usgs_crosswalk(&self) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.nws_usgs_crosswalk().await)
    }
}
