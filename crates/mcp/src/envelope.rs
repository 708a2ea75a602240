// Uniform JSON envelopes returned by every tool and resource

use crate::protocol::{CallToolResult, ToolContent};
use serde::Serialize;

/// Failure shape for tools: `success: false` plus the error and a fixed
/// human-readable context message.
#[derive(Debug, Clone, Serialize)]
pub struct ToolFailure {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<serde_json::Value>,
}

impl ToolFailure {
    pub fn new(error: impl std::fmt::Display, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            message: message.into(),
            debug_info: None,
        }
    }

    pub fn with_debug_info(mut self, debug_info: serde_json::Value) -> Self {
        self.debug_info = Some(debug_info);
        self
    }

    pub fn into_result(self) -> CallToolResult {
        tool_result(&self, true)
    }
}

/// Failure shape for resources. Unlike tools there is no `success` flag.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceFailure {
    pub error: String,
    pub message: String,
}

impl ResourceFailure {
    pub fn new(error: impl std::fmt::Display, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
        }
    }

    pub fn render(&self) -> String {
        render(self)
    }
}

/// Wrap an envelope as the single text item of a tool result.
pub fn tool_result<T: Serialize>(envelope: &T, is_error: bool) -> CallToolResult {
    CallToolResult {
        content: vec![ToolContent::text(render(envelope))],
        is_error: is_error.then_some(true),
    }
}

/// Pretty-printed JSON of an envelope.
pub fn render<T: Serialize>(envelope: &T) -> String {
    match serde_json::to_string_pretty(envelope) {
        Ok(json) => json,
        Err(e) => serde_json::json!({
            "success": false,
            "error": e.to_string(),
            "message": "Failed to encode response"
        })
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_tool_failure_shape() {
        let result = ToolFailure::new("API error (status 500): boom", "Failed to list characters")
            .into_result();

        assert_eq!(result.is_error, Some(true));
        let body: Value = serde_json::from_str(result.text().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "API error (status 500): boom",
                "message": "Failed to list characters"
            })
        );
    }

    #[test]
    fn test_tool_failure_debug_info() {
        let failure = ToolFailure::new("x", "y").with_debug_info(json!({"model": "dop-lite"}));
        let body: Value = serde_json::from_str(&render(&failure)).unwrap();
        assert_eq!(body["debug_info"]["model"], "dop-lite");
    }

    #[test]
    fn test_resource_failure_has_no_success_flag() {
        let body: Value =
            serde_json::from_str(&ResourceFailure::new("down", "Failed to fetch styles").render())
                .unwrap();
        assert!(body.get("success").is_none());
        assert_eq!(body["error"], "down");
        assert_eq!(body["message"], "Failed to fetch styles");
    }

    #[test]
    fn test_success_result_is_not_flagged() {
        let result = tool_result(&json!({"success": true}), false);
        assert!(result.is_error.is_none());
    }
}
