use std::borrow::Cow;

use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};
use usgs_water_core::{Payload, ToolError};

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Maps a control-plane outcome onto the MCP result.
///
/// Validation failures are protocol errors; upstream and network failures are
/// tool results flagged as errors so the caller sees the message.
pub(crate) fn tool_result(result: Result<Payload, ToolError>) -> Result<CallToolResult, ErrorData> {
    match result {
        Ok(Payload::Json(value)) => Ok(CallToolResult::success(vec![Content::json(value)?])),
        Ok(Payload::Text(text)) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(err @ ToolError::InvalidParams { .. }) => {
            Err(mcp_err(ErrorCode::INVALID_PARAMS, err.to_string()))
        }
        Err(err @ ToolError::InvalidBaseUrl(_)) => {
            Err(mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string()))
        }
        Err(err @ (ToolError::Transport { .. } | ToolError::UpstreamStatus { .. })) => {
            Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_payload_is_a_success() {
        let result = tool_result(Ok(Payload::Json(json!({"count": 0})))).expect("success");
        assert_ne!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn invalid_params_become_protocol_errors() {
        let err = tool_result(Err(ToolError::invalid("sites", "at least one site number is required")))
            .expect_err("protocol error");
        assert_eq!(err.code.0, ErrorCode::INVALID_PARAMS.0);
        assert_eq!(err.message, "invalid sites: at least one site number is required");
    }

    #[test]
    fn upstream_failures_are_error_results() {
        let result = tool_result(Err(ToolError::UpstreamStatus {
            status: 500,
            url: "https://waterservices.usgs.gov/nwis/iv/".to_string(),
            body: String::new(),
        }))
        .expect("tool-level error");
        assert_eq!(result.is_error, Some(true));
    }
}
