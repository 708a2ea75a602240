// MCP tool trait, registry and schema helpers

use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;

    /// Whether the tool only reads upstream state
    fn read_only(&self) -> bool {
        false
    }
}

/// Tool registry for managing available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        self.tools.insert(schema.name.clone(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool schemas, sorted by name
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|t| {
                let mut schema = t.schema();
                if t.read_only() {
                    schema.annotations = Some(ToolAnnotations {
                        read_only_hint: true,
                    });
                }
                schema
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserialize tool arguments; a missing argument object counts as empty.
pub fn parse_arguments<T: DeserializeOwned>(arguments: serde_json::Value) -> Result<T, String> {
    let arguments = if arguments.is_null() {
        serde_json::json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_integer(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "integer",
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "boolean",
        "description": description
    })
}

pub fn json_schema_array(items: serde_json::Value, description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "array",
        "items": items,
        "description": description
    })
}

/// String restricted to `values`, with a default
pub fn json_schema_enum(description: &str, values: &[&str], default: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description,
        "enum": values,
        "default": default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use serde::Deserialize;

    struct EchoTool {
        read_only: bool,
        name: &'static str,
    }

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name.to_string(),
                description: "Echo".to_string(),
                input_schema: json_schema_object(serde_json::json!({}), vec![]),
                annotations: None,
            }
        }

        async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
            Ok(CallToolResult {
                content: vec![ToolContent::text(arguments.to_string())],
                is_error: None,
            })
        }

        fn read_only(&self) -> bool {
            self.read_only
        }
    }

    #[test]
    fn test_registry_lists_sorted_with_annotations() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { read_only: false, name: "zeta" }));
        registry.register(Arc::new(EchoTool { read_only: true, name: "alpha" }));

        let schemas = registry.list_schemas();
        assert_eq!(schemas[0].name, "alpha");
        assert!(schemas[0].annotations.as_ref().unwrap().read_only_hint);
        assert!(schemas[1].annotations.is_none());
        assert!(registry.contains("zeta"));
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[derive(Debug, Deserialize)]
    struct Args {
        #[serde(default)]
        page: Option<u32>,
    }

    #[test]
    fn test_parse_arguments_accepts_null() {
        let args: Args = parse_arguments(serde_json::Value::Null).unwrap();
        assert!(args.page.is_none());
    }

    #[test]
    fn test_parse_arguments_reports_errors() {
        let err = parse_arguments::<Args>(serde_json::json!({"page": "one"})).unwrap_err();
        assert!(err.starts_with("Invalid arguments"));
    }
}
