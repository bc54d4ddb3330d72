use std::{error::Error, fmt};

#[derive(Debug)]
pub enum ToolError {
    /// A tool argument failed validation before any request was made.
    InvalidParams { field: &'static str, message: String },
    /// A configured base URL cannot carry path segments.
    InvalidBaseUrl(String),
    /// The request never produced a response (DNS, connect, timeout, body read).
    Transport { url: String, source: Box<reqwest::Error> },
    /// The upstream answered with a non-success status.
    UpstreamStatus { status: u16, url: String, body: String },
}

impl ToolError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParams {
            field,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_invalid_params(&self) -> bool {
        matches!(self, Self::InvalidParams { .. })
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { field, message } => write!(f, "invalid {field}: {message}"),
            Self::InvalidBaseUrl(url) => write!(f, "base URL cannot be extended: {url}"),
            Self::Transport { url, source } => write!(f, "request to {url} failed: {source}"),
            Self::UpstreamStatus { status, url, body } => {
                if body.is_empty() {
                    write!(f, "upstream returned HTTP {status} for {url}")
                } else {
                    write!(f, "upstream returned HTTP {status} for {url}: {body}")
                }
            }
        }
    }
}

impl Error for ToolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_includes_body_when_present() {
        let err = ToolError::UpstreamStatus {
            status: 404,
            url: "https://example.test/states/ZZ".to_string(),
            body: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "upstream returned HTTP 404 for https://example.test/states/ZZ: not found"
        );
    }

    #[test]
    fn invalid_params_names_the_field() {
        let err = ToolError::invalid("sites", "at least one site is required");
        assert!(err.is_invalid_params());
        assert_eq!(err.to_string(), "invalid sites: at least one site is required");
    }
}
