use crate::client::{Payload, UsgsClient};
use crate::error::ToolResult;
use crate::request::ApiRequest;

pub mod flood_impact;
pub mod ogc;
pub mod water_data;

pub use flood_impact::ReferencePointsPage;
pub use ogc::{CollectionPageRequest, MonitoringLocationsRequest};
pub use water_data::InstantaneousValuesRequest;

/// Entry point for every tool: build the request, then issue it.
#[derive(Debug, Clone)]
pub struct UsgsControlPlane {
    client: UsgsClient,
}

impl UsgsControlPlane {
    #[must_use]
    pub const fn new(client: UsgsClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub const fn client(&self) -> &UsgsClient {
        &self.client
    }

    async fn run(&self, request: ToolResult<ApiRequest>) -> ToolResult<Payload> {
        let request = request?;
        self.client.execute(&request).await
    }
}
