//! Real-Time Flood Impacts reference-point service.

use serde::{Deserialize, Serialize};

use crate::client::Payload;
use crate::control::UsgsControlPlane;
use crate::endpoints::{self, Endpoint};
use crate::error::ToolResult;
use crate::query::QueryParams;
use crate::request::ApiRequest;
use crate::validate;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReferencePointsPage {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Builds `get_reference_points` with `page` and `limit` always present.
///
/// # Errors
/// Returns `InvalidParams` for page 0 or limit 0.
pub fn reference_points(page: ReferencePointsPage) -> ToolResult<ApiRequest> {
    let page_number = validate::page(page.page.unwrap_or(DEFAULT_PAGE))?;
    let limit = validate::limit(page.limit.unwrap_or(DEFAULT_LIMIT), None)?;

    let mut query = QueryParams::new();
    query.push("page", page_number).push("limit", limit);
    Ok(ApiRequest::new(endpoints::REFERENCE_POINTS).with_query(query))
}

/// Builds a request for an endpoint with one `{field}` path segment.
///
/// # Errors
/// Returns `InvalidParams` when the value is blank.
pub fn by_id(endpoint: Endpoint, field: &'static str, value: &str) -> ToolResult<ApiRequest> {
    let value = validate::path_value(field, value)?;
    Ok(ApiRequest::new(endpoint).with_path(field, value))
}

impl UsgsControlPlane {
    /// # Errors
    /// Returns transport or upstream status errors.
    pub async fn flooding_reference_points(&self) -> ToolResult<Payload> {
        self.run(Ok(ApiRequest::new(endpoints::FLOODING_REFERENCE_POINTS))).await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn reference_points(&self, page: ReferencePointsPage) -> ToolResult<Payload> {
        self.run(reference_points(page)).await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn reference_point(&self, reference_point_id: &str) -> ToolResult<Payload> {
        self.run(by_id(
            endpoints::REFERENCE_POINT_BY_ID,
            "reference_point_id",
            reference_point_id,
        ))
        .await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn reference_points_by_state(&self, state_id: &str) -> ToolResult<Payload> {
        self.run(by_id(endpoints::REFERENCE_POINTS_BY_STATE, "state_id", state_id))
            .await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn reference_point_by_nwis_id(&self, nwis_id: &str) -> ToolResult<Payload> {
        self.run(by_id(endpoints::REFERENCE_POINT_BY_NWIS_ID, "nwis_id", nwis_id))
            .await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn reference_points_by_nws_id(&self, nws_id: &str) -> ToolResult<Payload> {
        self.run(by_id(endpoints::REFERENCE_POINTS_BY_NWS_ID, "nws_id", nws_id))
            .await
    }

    /// # Errors
    /// Returns transport or upstream status errors.
    pub async fn inactive_reference_points(&self) -> ToolResult<Payload> {
        self.run(Ok(ApiRequest::new(endpoints::INACTIVE_REFERENCE_POINTS))).await
    }

    /// # Errors
    /// Returns transport or upstream status errors.
    pub async fn states(&self) -> ToolResult<Payload> {
        self.run(Ok(ApiRequest::new(endpoints::STATES))).await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn state(&self, state_id: &str) -> ToolResult<Payload> {
        self.run(by_id(endpoints::STATE_BY_ID, "state_id", state_id)).await
    }

    /// # Errors
    /// Returns transport or upstream status errors.
    pub async fn counties(&self) -> ToolResult<Payload> {
        self.run(Ok(ApiRequest::new(endpoints::COUNTIES))).await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn counties_by_state(&self, state_id: &str) -> ToolResult<Payload> {
        self.run(by_id(endpoints::COUNTIES_BY_STATE, "state_id", state_id)).await
    }

    /// # Errors
    /// Returns transport or upstream status errors.
    pub async fn nws_usgs_crosswalk(&self) -> ToolResult<Payload> {
        self.run(Ok(ApiRequest::new(endpoints::NWS_USGS_CROSSWALK))).await
    }
}
