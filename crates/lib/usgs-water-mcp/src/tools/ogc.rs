use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use usgs_water_core::control::{CollectionPageRequest, MonitoringLocationsRequest};

use crate::{UsgsWaterMcp, helpers};

/// Parameters for searching monitoring locations.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MonitoringLocationsParams {
    /// Bounding box as "minx,miny,maxx,maxy" in WGS84 degrees.
    pub bbox: Option<String>,
    /// Maximum number of results, 1-10000 (default 100).
    pub limit: Option<u32>,
    /// Starting offset for pagination (default 0).
    pub offset: Option<u32>,
    /// Agency code (e.g. "USGS").
    pub agency_code: Option<String>,
    /// State FIPS code (e.g. "24").
    pub state_code: Option<String>,
    /// County FIPS code.
    pub county_code: Option<String>,
    /// Site type code (e.g. "ST" for stream).
    pub site_type_code: Option<String>,
    /// Monitoring location number (e.g. "01646500").
    pub monitoring_location_number: Option<String>,
}

/// Parameters for fetching a monitoring location by id.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LocationIdParams {
    /// Monitoring location id (e.g. "USGS-01646500").
    pub location_id: String,
}

/// Parameters for paging through a code-list collection.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CollectionPageParams {
    /// Maximum number of results, 1-10000 (default 100).
    pub limit: Option<u32>,
    /// Starting offset for pagination (default 0).
    pub offset: Option<u32>,
}

impl From<CollectionPageParams> for CollectionPageRequest {
    fn from(params: CollectionPageParams) -> Self {
        Self {
            limit: params.limit,
            offset: params.offset,
        }
    }
}

impl From<MonitoringLocationsParams> for MonitoringLocationsRequest {
    fn from(params: MonitoringLocationsParams) -> Self {
        Self {
            bbox: params.bbox,
            limit: params.limit,
            offset: params.offset,
            agency_code: params.agency_code,
            state_code: params.state_code,
            county_code: params.county_code,
            site_type_code: params.site_type_code,
            monitoring_location_number: params.monitoring_location_number,
        }
    }
}

#[tool_router(router = tool_router_ogc, vis = "pub")]
impl UsgsWaterMcp {
    #[tool(description = "Get monitoring locations from the USGS OGC API, filtered by bbox, agency, state, county or site type.")]
    async fn get_monitoring_locations(
        &self,
        Parameters(params): Parameters<MonitoringLocationsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = MonitoringLocationsRequest::from(params);
        helpers::tool_result(self.control.monitoring_locations(&request).await)
    }

    #[tool(description = "Get a specific monitoring location by id from the USGS OGC API.")]
    async fn get_monitoring_location_by_id(
        &self,
        Parameters(params): Parameters<LocationIdParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.monitoring_location(&params.location_id).await)
    }

    #[tool(description = "Get agency identification codes from the USGS OGC API.")]
    async fn get_agency_codes(
        &self,
        Parameters(params): Parameters<CollectionPageParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.agency_codes(params.into()).await)
    }

    #[tool(description = "Get vertical datum information from the USGS OGC API.")]
    async fn get_altitude_datums(
        &self,
        Parameters(params): Parameters<CollectionPageParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.altitude_datums(params.into()).await)
    }

    #[tool(description = "Get aquifer identification codes from the USGS OGC API.")]
    async fn get_aquifer_codes(
        &self,
        Parameters(params): Parameters<CollectionPageParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.aquifer_codes(params.into()).await)
    }

    #[tool(description = "Get aquifer type information from the USGS OGC API.")]
    async fn get_aquifer_types(
        &self,
        Parameters(params): Parameters<CollectionPageParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.aquifer_types(params.into()).await)
    }

    #[tool(description = "Get coordinate accuracy codes from the USGS OGC API.")]
    async fn get_coordinate_accuracy_codes(
        &self,
        Parameters(params): Parameters<CollectionPageParams>,
    ) -> Result<CallToolResult, ErrorData> {
        helpers::tool_result(self.control.coordinate_accuracy_codes(params.into()).await)
    }
}

#[cfg(test)]
mod tests {
    use usgs_water_core::ClientConfig;

    use super::*;
    use crate::tests::test_server;

    #[test]
    fn params_deserialize_with_everything_omitted() {
        let params: MonitoringLocationsParams =
            serde_json::from_value(serde_json::json!({})).expect("all fields optional");
        let request = MonitoringLocationsRequest::from(params);
        assert!(request.bbox.is_none());
        assert!(request.limit.is_none());
    }

    #[tokio::test]
    async fn malformed_bbox_is_invalid_params() {
        let err = test_server(ClientConfig::default())
            .get_monitoring_locations(Parameters(MonitoringLocationsParams {
                bbox: Some("-77.5,38.5".to_string()),
                limit: None,
                offset: None,
                agency_code: None,
                state_code: None,
                county_code: None,
                site_type_code: None,
                monitoring_location_number: None,
            }))
            .await
            .expect_err("bbox needs four numbers");
        assert!(err.message.contains("bbox"));
    }

    #[tokio::test]
    async fn blank_location_id_is_invalid_params() {
        let err = test_server(ClientConfig::default())
            .get_monitoring_location_by_id(Parameters(LocationIdParams {
                location_id: " ".to_string(),
            }))
            .await
            .expect_err("blank id");
        assert!(err.message.contains("location_id"));
    }
}
