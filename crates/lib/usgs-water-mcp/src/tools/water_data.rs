use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use usgs_water_core::control::InstantaneousValuesRequest;

use crate::{UsgsWaterMcp, helpers};

/// Parameters for fetching NWIS instantaneous values.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FetchUsgsDataParams {
    /// Comma-separated site numbers (e.g. "01646500" or "01646500,01647000").
    pub sites: String,
    /// Comma-separated 5-digit parameter codes (e.g. "00060,00065").
    pub parameter_codes: Option<String>,
    /// Start date, YYYY-MM-DD or YYYY-MM-DDTHH:MM.
    pub start_date: Option<String>,
    /// End date, YYYY-MM-DD or YYYY-MM-DDTHH:MM.
    pub end_date: Option<String>,
    /// ISO-8601 duration back from now (e.g. "P7D", "PT6H"). Not combinable with dates.
    pub period: Option<String>,
    /// "json" (default) or "rdb" (tab-delimited text returned under `data`).
    pub format: Option<String>,
    /// "all", "active" or "inactive".
    pub site_status: Option<String>,
}

impl From<FetchUsgsDataParams> for InstantaneousValuesRequest {
    fn from(params: FetchUsgsDataParams) -> Self {
        Self {
            sites: params.sites,
            parameter_codes: params.parameter_codes,
            start_date: params.start_date,
            end_date: params.end_date,
            period: params.period,
            format: params.format,
            site_status: params.site_status,
        }
    }
}

#[tool_router(router = tool_router_water_data, vis = "pub")]
impl UsgsWaterMcp {
    #[tool(description = "Fetch current (instantaneous) water data from USGS for specified sites.")]
    async fn fetch_usgs_data(
        &self,
        Parameters(params): Parameters<FetchUsgsDataParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = InstantaneousValuesRequest::from(params);
        helpers::tool_result(self.control.instantaneous_values(&request).await)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use serde_json::json;
    use usgs_water_core::client::parse_base_url;
    use usgs_water_core::endpoints::UpstreamApi;
    use usgs_water_core::{BaseUrls, ClientConfig};

    use super::*;
    use crate::tests::test_server;

    fn params(sites: &str) -> FetchUsgsDataParams {
        FetchUsgsDataParams {
            sites: sites.to_string(),
            parameter_codes: None,
            start_date: None,
            end_date: None,
            period: None,
            format: None,
            site_status: None,
        }
    }

    #[tokio::test]
    async fn fetch_returns_upstream_json() {
        let mock_server = MockServer::start_async().await;
        let mock = mock_server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/nwis/iv/")
                    .query_param("sites", "01646500")
                    .query_param("parameterCd", "00065");
                then.status(200).json_body(json!({"value": {"timeSeries": []}}));
            })
            .await;

        let bases = BaseUrls::default().with_base(
            UpstreamApi::WaterServices,
            parse_base_url(&mock_server.url("/nwis/iv/")).expect("mock url"),
        );
        let server = test_server(ClientConfig::new(bases).with_timeout(Duration::from_secs(5)));

        let result = server
            .fetch_usgs_data(Parameters(FetchUsgsDataParams {
                parameter_codes: Some("00065".to_string()),
                ..params("01646500")
            }))
            .await
            .expect("tool should succeed");

        mock.assert_async().await;
        assert_ne!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
    }

    #[tokio::test]
    async fn invalid_sites_are_rejected_before_any_request() {
        let server = test_server(ClientConfig::default());
        let err = server
            .fetch_usgs_data(Parameters(params("abc")))
            .await
            .expect_err("invalid sites");
        assert!(err.message.contains("sites"));
    }
}
