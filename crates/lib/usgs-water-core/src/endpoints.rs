//! The fixed catalog of upstream endpoints exposed as tools.

use serde::Serialize;

pub const WATER_SERVICES_BASE_URL: &str = "https://waterservices.usgs.gov/nwis/iv/";
pub const FLOOD_IMPACTS_BASE_URL: &str = "https://api.waterdata.usgs.gov/rtfi-api";
pub const OGC_BASE_URL: &str = "https://api.waterdata.usgs.gov/ogcapi/v0";

/// Upstream API family an endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamApi {
    /// NWIS instantaneous values service.
    WaterServices,
    /// Real-Time Flood Impacts reference-point service.
    FloodImpacts,
    /// OGC API monitoring-location catalog.
    Ogc,
}

impl UpstreamApi {
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::WaterServices => WATER_SERVICES_BASE_URL,
            Self::FloodImpacts => FLOOD_IMPACTS_BASE_URL,
            Self::Ogc => OGC_BASE_URL,
        }
    }
}

/// How an upstream body is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// JSON passed through unchanged.
    Json,
    /// JSON passed through, except a top-level array becomes `{"items": [...], "count": n}`.
    JsonObject,
    /// Raw text wrapped as `{"data": "<body>"}`.
    TextEnvelope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub tool: &'static str,
    pub api: UpstreamApi,
    /// Path below the API base; `{name}` segments are filled from tool arguments.
    pub path: &'static str,
    pub shape: ResponseShape,
    pub summary: &'static str,
}

impl Endpoint {
    /// Placeholder names in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        let path: &'static str = self.path;
        path.split('/').filter_map(|segment| {
            segment
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
        })
    }
}

pub const FETCH_USGS_DATA: Endpoint = Endpoint {
    tool: "fetch_usgs_data",
    api: UpstreamApi::WaterServices,
    path: "",
    shape: ResponseShape::Json,
    summary: "Fetch instantaneous water data (discharge, gage height, ...) for one or more NWIS sites.",
};

pub const FLOODING_REFERENCE_POINTS: Endpoint = Endpoint {
    tool: "get_flooding_reference_points",
    api: UpstreamApi::FloodImpacts,
    path: "referencepoints/flooding",
    shape: ResponseShape::JsonObject,
    summary: "Reference points that are currently flooding.",
};

pub const REFERENCE_POINTS: Endpoint = Endpoint {
    tool: "get_reference_points",
    api: UpstreamApi::FloodImpacts,
    path: "referencepoints",
    shape: ResponseShape::JsonObject,
    summary: "Paginated list of flood impact reference points.",
};

pub const REFERENCE_POINT_BY_ID: Endpoint = Endpoint {
    tool: "get_reference_point_by_id",
    api: UpstreamApi::FloodImpacts,
    path: "referencepoints/{reference_point_id}",
    shape: ResponseShape::JsonObject,
    summary: "A single reference point by its id.",
};

pub const REFERENCE_POINTS_BY_STATE: Endpoint = Endpoint {
    tool: "get_reference_points_by_state",
    api: UpstreamApi::FloodImpacts,
    path: "referencepoints/state/{state_id}",
    shape: ResponseShape::JsonObject,
    summary: "Reference points within a state.",
};

pub const REFERENCE_POINT_BY_NWIS_ID: Endpoint = Endpoint {
    tool: "get_reference_point_by_nwis_id",
    api: UpstreamApi::FloodImpacts,
    path: "referencepoints/nwis/{nwis_id}",
    shape: ResponseShape::JsonObject,
    summary: "Reference point attached to a USGS (NWIS) gage.",
};

pub const REFERENCE_POINTS_BY_NWS_ID: Endpoint = Endpoint {
    tool: "get_reference_points_by_nws_id",
    api: UpstreamApi::FloodImpacts,
    path: "referencepoints/nws/{nws_id}",
    shape: ResponseShape::JsonObject,
    summary: "Reference points attached to a National Weather Service location.",
};

pub const INACTIVE_REFERENCE_POINTS: Endpoint = Endpoint {
    tool: "get_inactive_reference_points",
    api: UpstreamApi::FloodImpacts,
    path: "referencepoints/inactive",
    shape: ResponseShape::JsonObject,
    summary: "Reference points that are no longer active.",
};

pub const STATES: Endpoint = Endpoint {
    tool: "get_states",
    api: UpstreamApi::FloodImpacts,
    path: "states",
    shape: ResponseShape::JsonObject,
    summary: "States known to the flood impacts service.",
};

pub const STATE_BY_ID: Endpoint = Endpoint {
    tool: "get_state_by_id",
    api: UpstreamApi::FloodImpacts,
    path: "states/{state_id}",
    shape: ResponseShape::JsonObject,
    summary: "A single state by id.",
};

pub const COUNTIES: Endpoint = Endpoint {
    tool: "get_counties",
    api: UpstreamApi::FloodImpacts,
    path: "counties",
    shape: ResponseShape::JsonObject,
    summary: "Counties known to the flood impacts service.",
};

pub const COUNTIES_BY_STATE: Endpoint = Endpoint {
    tool: "get_counties_by_state",
    api: UpstreamApi::FloodImpacts,
    path: "counties/state/{state_id}",
    shape: ResponseShape::JsonObject,
    summary: "Counties within a state.",
};

pub const NWS_USGS_CROSSWALK: Endpoint = Endpoint {
    tool: "get_nws_usgs_crosswalk",
    api: UpstreamApi::FloodImpacts,
    path: "nws_usgs",
    shape: ResponseShape::JsonObject,
    summary: "Crosswalk between NWS location ids and USGS gage ids.",
};

pub const MONITORING_LOCATIONS: Endpoint = Endpoint {
    tool: "get_monitoring_locations",
    api: UpstreamApi::Ogc,
    path: "collections/monitoring-locations/items",
    shape: ResponseShape::JsonObject,
    summary: "Search monitoring locations by bounding box, agency, state, county or site type.",
};

pub const MONITORING_LOCATION_BY_ID: Endpoint = Endpoint {
    tool: "get_monitoring_location_by_id",
    api: UpstreamApi::Ogc,
    path: "collections/monitoring-locations/items/{location_id}",
    shape: ResponseShape::JsonObject,
    summary: "A single monitoring location by id (e.g. USGS-01646500).",
};

pub const AGENCY_CODES: Endpoint = Endpoint {
    tool: "get_agency_codes",
    api: UpstreamApi::Ogc,
    path: "collections/agency-codes/items",
    shape: ResponseShape::JsonObject,
    summary: "Agency identification codes.",
};

pub const ALTITUDE_DATUMS: Endpoint = Endpoint {
    tool: "get_altitude_datums",
    api: UpstreamApi::Ogc,
    path: "collections/altitude-datums/items",
    shape: ResponseShape::JsonObject,
    summary: "Vertical datum codes.",
};

pub const AQUIFER_CODES: Endpoint = Endpoint {
    tool: "get_aquifer_codes",
    api: UpstreamApi::Ogc,
    path: "collections/aquifer-codes/items",
    shape: ResponseShape::JsonObject,
    summary: "Aquifer identification codes.",
};

pub const AQUIFER_TYPES: Endpoint = Endpoint {
    tool: "get_aquifer_types",
    api: UpstreamApi::Ogc,
    path: "collections/aquifer-types/items",
    shape: ResponseShape::JsonObject,
    summary: "Aquifer type codes.",
};

pub const COORDINATE_ACCURACY_CODES: Endpoint = Endpoint {
    tool: "get_coordinate_accuracy_codes",
    api: UpstreamApi::Ogc,
    path: "collections/coordinate-accuracy-codes/items",
    shape: ResponseShape::JsonObject,
    summary: "Coordinate accuracy codes.",
};

pub const ALL: &[Endpoint] = &[
    FETCH_USGS_DATA,
    FLOODING_REFERENCE_POINTS,
    REFERENCE_POINTS,
    REFERENCE_POINT_BY_ID,
    REFERENCE_POINTS_BY_STATE,
    REFERENCE_POINT_BY_NWIS_ID,
    REFERENCE_POINTS_BY_NWS_ID,
    INACTIVE_REFERENCE_POINTS,
    STATES,
    STATE_BY_ID,
    COUNTIES,
    COUNTIES_BY_STATE,
    NWS_USGS_CROSSWALK,
    MONITORING_LOCATIONS,
    MONITORING_LOCATION_BY_ID,
    AGENCY_CODES,
    ALTITUDE_DATUMS,
    AQUIFER_CODES,
    AQUIFER_TYPES,
    COORDINATE_ACCURACY_CODES,
];

#[must_use]
pub fn find(tool: &str) -> Option<&'static Endpoint> {
    ALL.iter().find(|endpoint| endpoint.tool == tool)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn tool_names_are_unique() {
        let names: HashSet<_> = ALL.iter().map(|endpoint| endpoint.tool).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn placeholders_follow_template_order() {
        let names: Vec<_> = MONITORING_LOCATION_BY_ID.placeholders().collect();
        assert_eq!(names, vec!["location_id"]);
        assert_eq!(STATES.placeholders().count(), 0);
        assert_eq!(FETCH_USGS_DATA.placeholders().count(), 0);
    }

    #[test]
    fn find_resolves_catalog_entries() {
        let endpoint = find("get_counties_by_state").expect("catalog entry");
        assert_eq!(endpoint.path, "counties/state/{state_id}");
        assert_eq!(endpoint.api, UpstreamApi::FloodImpacts);
        assert!(find("get_weather").is_none());
    }
}
