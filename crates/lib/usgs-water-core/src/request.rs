use url::Url;

use crate::client::BaseUrls;
use crate::endpoints::{Endpoint, ResponseShape};
use crate::error::{ToolError, ToolResult};
use crate::query::QueryParams;

/// A fully validated upstream call: endpoint, path values, query and response shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub path_values: Vec<(&'static str, String)>,
    pub query: QueryParams,
    pub shape: ResponseShape,
}

impl ApiRequest {
    #[must_use]
    pub const fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            path_values: Vec::new(),
            query: QueryParams::new(),
            shape: endpoint.shape,
        }
    }

    #[must_use]
    pub fn with_path(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_values.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub const fn with_shape(mut self, shape: ResponseShape) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub const fn tool(&self) -> &'static str {
        self.endpoint.tool
    }

    /// Path segments with placeholders replaced by their values.
    ///
    /// # Errors
    /// Returns `InvalidParams` when a placeholder has no value or a value has
    /// no matching placeholder.
    pub fn path_segments(&self) -> ToolResult<Vec<&str>> {
        let mut segments = Vec::new();
        for segment in self.endpoint.path.split('/').filter(|segment| !segment.is_empty()) {
            let name = segment
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'));
            match name {
                Some(name) => {
                    let value = self
                        .path_values
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| value.as_str())
                        .ok_or_else(|| ToolError::invalid("path", format!("missing value for {{{name}}}")))?;
                    segments.push(value);
                }
                None => segments.push(segment),
            }
        }

        if let Some((name, _)) = self
            .path_values
            .iter()
            .find(|(name, _)| !self.endpoint.placeholders().any(|known| known == *name))
        {
            return Err(ToolError::invalid(
                "path",
                format!("{} has no {{{name}}} segment", self.endpoint.tool),
            ));
        }
        Ok(segments)
    }

    /// Resolves the absolute upstream URL against the configured base URLs.
    ///
    /// # Errors
    /// Returns `InvalidParams` for unresolved placeholders, or `InvalidBaseUrl`
    /// when the base URL cannot take path segments.
    pub fn url(&self, bases: &BaseUrls) -> ToolResult<Url> {
        let mut url = bases.for_api(self.endpoint.api).clone();
        let segments = self.path_segments()?;
        if !segments.is_empty() {
            if url.cannot_be_a_base() {
                return Err(ToolError::InvalidBaseUrl(url.to_string()));
            }
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().extend(segments);
            }
        }

        if self.query.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&self.query.to_query_string()));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::{FETCH_USGS_DATA, REFERENCE_POINT_BY_NWIS_ID, STATES};

    #[test]
    fn base_only_endpoint_keeps_trailing_slash() {
        let mut query = QueryParams::new();
        query.push("sites", "01646500").push("format", "json");
        let url = ApiRequest::new(FETCH_USGS_DATA)
            .with_query(query)
            .url(&BaseUrls::default())
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://waterservices.usgs.gov/nwis/iv/?sites=01646500&format=json"
        );
    }

    #[test]
    fn placeholder_values_are_single_segments() {
        let url = ApiRequest::new(REFERENCE_POINT_BY_NWIS_ID)
            .with_path("nwis_id", "0164/6500")
            .url(&BaseUrls::default())
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://api.waterdata.usgs.gov/rtfi-api/referencepoints/nwis/0164%2F6500"
        );
    }

    #[test]
    fn missing_placeholder_is_rejected() {
        let err = ApiRequest::new(REFERENCE_POINT_BY_NWIS_ID)
            .url(&BaseUrls::default())
            .expect_err("missing value");
        assert!(err.is_invalid_params());
    }

    #[test]
    fn unknown_path_value_is_rejected() {
        let err = ApiRequest::new(STATES)
            .with_path("state_id", "TX")
            .url(&BaseUrls::default())
            .expect_err("states takes no id");
        assert!(err.is_invalid_params());
    }
}
