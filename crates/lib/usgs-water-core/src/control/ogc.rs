//! OGC API monitoring-location catalog.

use serde::{Deserialize, Serialize};

use crate::client::Payload;
use crate::control::UsgsControlPlane;
use crate::endpoints::{self, Endpoint};
use crate::error::ToolResult;
use crate::query::QueryParams;
use crate::request::ApiRequest;
use crate::validate::{self, OGC_MAX_LIMIT, non_blank};

pub const DEFAULT_LIMIT: u32 = 100;
pub const DEFAULT_OFFSET: u32 = 0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CollectionPageRequest {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringLocationsRequest {
    pub bbox: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub agency_code: Option<String>,
    pub state_code: Option<String>,
    pub county_code: Option<String>,
    pub site_type_code: Option<String>,
    pub monitoring_location_number: Option<String>,
}

fn paging(limit: Option<u32>, offset: Option<u32>) -> ToolResult<QueryParams> {
    let limit = validate::limit(limit.unwrap_or(DEFAULT_LIMIT), Some(OGC_MAX_LIMIT))?;
    let mut query = QueryParams::new();
    query
        .push("limit", limit)
        .push("offset", offset.unwrap_or(DEFAULT_OFFSET));
    Ok(query)
}

/// Builds `get_monitoring_locations`.
///
/// Query order: `limit`, `offset`, then the optional filters.
///
/// # Errors
/// Returns `InvalidParams` for an out-of-range limit or a malformed bbox.
pub fn monitoring_locations(request: &MonitoringLocationsRequest) -> ToolResult<ApiRequest> {
    let mut query = paging(request.limit, request.offset)?;
    if let Some(bbox) = non_blank(request.bbox.as_deref()) {
        query.push("bbox", validate::bbox(bbox)?);
    }
    query
        .push_opt("agency_code", request.agency_code.as_deref())
        .push_opt("state_code", request.state_code.as_deref())
        .push_opt("county_code", request.county_code.as_deref())
        .push_opt("site_type_code", request.site_type_code.as_deref())
        .push_opt(
            "monitoring_location_number",
            request.monitoring_location_number.as_deref(),
        );
    Ok(ApiRequest::new(endpoints::MONITORING_LOCATIONS).with_query(query))
}

/// Builds `get_monitoring_location_by_id`.
///
/// # Errors
/// Returns `InvalidParams` when the id is blank.
pub fn monitoring_location(location_id: &str) -> ToolResult<ApiRequest> {
    let location_id = validate::path_value("location_id", location_id)?;
    Ok(ApiRequest::new(endpoints::MONITORING_LOCATION_BY_ID).with_path("location_id", location_id))
}

/// Builds a paged request for one of the code-list collections.
///
/// # Errors
/// Returns `InvalidParams` for an out-of-range limit.
pub fn collection_page(endpoint: Endpoint, page: CollectionPageRequest) -> ToolResult<ApiRequest> {
    let query = paging(page.limit, page.offset)?;
    Ok(ApiRequest::new(endpoint).with_query(query))
}

impl UsgsControlPlane {
    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn monitoring_locations(
        &self,
        request: &MonitoringLocationsRequest,
    ) -> ToolResult<Payload> {
        self.run(monitoring_locations(request)).await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn monitoring_location(&self, location_id: &str) -> ToolResult<Payload> {
        self.run(monitoring_location(location_id)).await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn agency_codes(&self, page: CollectionPageRequest) -> ToolResult<Payload> {
        self.run(collection_page(endpoints::AGENCY_CODES, page)).await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn altitude_datums(&self, page: CollectionPageRequest) -> ToolResult<Payload> {
        self.run(collection_page(endpoints::ALTITUDE_DATUMS, page)).await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn aquifer_codes(&self, page: CollectionPageRequest) -> ToolResult<Payload> {
        self.run(collection_page(endpoints::AQUIFER_CODES, page)).await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn aquifer_types(&self, page: CollectionPageRequest) -> ToolResult<Payload> {
        self.run(collection_page(endpoints::AQUIFER_TYPES, page)).await
    }

    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn coordinate_accuracy_codes(
        &self,
        page: CollectionPageRequest,
    ) -> ToolResult<Payload> {
        self.run(collection_page(endpoints::COORDINATE_ACCURACY_CODES, page))
            .await
    }
}
