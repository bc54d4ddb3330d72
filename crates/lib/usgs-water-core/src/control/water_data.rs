//! NWIS instantaneous values service.

use serde::{Deserialize, Serialize};

use crate::client::Payload;
use crate::control::UsgsControlPlane;
use crate::endpoints::{FETCH_USGS_DATA, ResponseShape};
use crate::error::ToolResult;
use crate::query::QueryParams;
use crate::request::ApiRequest;
use crate::validate::{self, OutputFormat, SiteStatus, non_blank};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstantaneousValuesRequest {
    pub sites: String,
    pub parameter_codes: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub period: Option<String>,
    pub format: Option<String>,
    pub site_status: Option<String>,
}

impl InstantaneousValuesRequest {
    pub fn new(sites: impl Into<String>) -> Self {
        Self {
            sites: sites.into(),
            ..Self::default()
        }
    }
}

/// Builds the `fetch_usgs_data` request.
///
/// Query order: `sites`, `format`, `parameterCd`, `startDT`, `endDT`,
/// `period`, `siteStatus`.
///
/// # Errors
/// Returns `InvalidParams` when any argument fails validation.
pub fn instantaneous_values(request: &InstantaneousValuesRequest) -> ToolResult<ApiRequest> {
    let parameter_codes = non_blank(request.parameter_codes.as_deref());
    let start_date = non_blank(request.start_date.as_deref());
    let end_date = non_blank(request.end_date.as_deref());
    let period = non_blank(request.period.as_deref());

    validate::sites(&request.sites)?;
    if let Some(codes) = parameter_codes {
        validate::parameter_codes(codes)?;
    }
    validate::time_window(start_date, end_date, period)?;

    let format = non_blank(request.format.as_deref())
        .map(str::parse::<OutputFormat>)
        .transpose()?
        .unwrap_or_default();
    let site_status = non_blank(request.site_status.as_deref())
        .map(str::parse::<SiteStatus>)
        .transpose()?;

    let mut query = QueryParams::new();
    query.push_list("sites", &request.sites);
    query.push("format", format.as_str());
    if let Some(codes) = parameter_codes {
        query.push_list("parameterCd", codes);
    }
    query
        .push_opt("startDT", start_date)
        .push_opt("endDT", end_date)
        .push_opt("period", period.map(str::to_ascii_uppercase).as_deref());
    if let Some(status) = site_status {
        query.push("siteStatus", status.as_str());
    }

    let shape = match format {
        OutputFormat::Json => ResponseShape::Json,
        OutputFormat::Rdb => ResponseShape::TextEnvelope,
    };
    Ok(ApiRequest::new(FETCH_USGS_DATA).with_query(query).with_shape(shape))
}

impl UsgsControlPlane {
    /// Fetches instantaneous values for one or more NWIS sites.
    ///
    /// # Errors
    /// Returns validation, transport or upstream status errors.
    pub async fn instantaneous_values(
        &self,
        request: &InstantaneousValuesRequest,
    ) -> ToolResult<Payload> {
        self.run(instantaneous_values(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::BaseUrls;

    #[test]
    fn minimal_request_defaults_to_json() {
        let request = instantaneous_values(&InstantaneousValuesRequest::new("01646500"))
            .expect("valid request");
        assert_eq!(request.query.to_query_string(), "sites=01646500&format=json");
        assert_eq!(request.shape, ResponseShape::Json);
    }

    #[test]
    fn full_request_maps_names_and_order() {
        let request = instantaneous_values(&InstantaneousValuesRequest {
            sites: "01646500, 01647000".to_string(),
            parameter_codes: Some("00060,00065".to_string()),
            start_date: Some("2024-05-01".to_string()),
            end_date: Some("2024-05-02T12:00".to_string()),
            site_status: Some("active".to_string()),
            ..InstantaneousValuesRequest::default()
        })
        .expect("valid request");

        assert_eq!(
            request.query.to_query_string(),
            "sites=01646500%2C01647000&format=json&parameterCd=00060%2C00065\
             &startDT=2024-05-01&endDT=2024-05-02T12%3A00&siteStatus=active"
        );
    }

    #[test]
    fn period_is_forwarded_upper_cased() {
        let request = instantaneous_values(&InstantaneousValuesRequest {
            period: Some("p7d".to_string()),
            ..InstantaneousValuesRequest::new("01646500")
        })
        .expect("valid request");
        let url = request.url(&BaseUrls::default()).expect("url");
        assert_eq!(
            url.as_str(),
            "https://waterservices.usgs.gov/nwis/iv/?sites=01646500&format=json&period=P7D"
        );
    }

    #[test]
    fn blank_optionals_are_ignored() {
        let request = instantaneous_values(&InstantaneousValuesRequest {
            parameter_codes: Some(String::new()),
            start_date: Some("  ".to_string()),
            period: Some(String::new()),
            ..InstantaneousValuesRequest::new("01646500")
        })
        .expect("blank values behave like missing ones");
        assert_eq!(request.query.to_query_string(), "sites=01646500&format=json");
    }

    #[test]
    fn rdb_format_wraps_text() {
        let request = instantaneous_values(&InstantaneousValuesRequest {
            format: Some("rdb".to_string()),
            ..InstantaneousValuesRequest::new("01646500")
        })
        .expect("valid request");
        assert_eq!(request.query.get("format"), Some("rdb"));
        assert_eq!(request.shape, ResponseShape::TextEnvelope);
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        assert!(instantaneous_values(&InstantaneousValuesRequest::new("")).is_err());
        assert!(instantaneous_values(&InstantaneousValuesRequest {
            parameter_codes: Some("60".to_string()),
            ..InstantaneousValuesRequest::new("01646500")
        })
        .is_err());
        assert!(instantaneous_values(&InstantaneousValuesRequest {
            period: Some("P7D".to_string()),
            start_date: Some("2024-05-01".to_string()),
            ..InstantaneousValuesRequest::new("01646500")
        })
        .is_err());
        assert!(instantaneous_values(&InstantaneousValuesRequest {
            format: Some("xml".to_string()),
            ..InstantaneousValuesRequest::new("01646500")
        })
        .is_err());
    }
}
