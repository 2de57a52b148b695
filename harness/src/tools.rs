use crate::context::ExecutionContext;
use crate::git::GitError;
use async_trait::async_trait;
use protocol::types::{ToolCall, ToolDefinition, ToolResponse};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    #[error("Tool not found: {name}")]
    NotFound { name: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Git(#[from] GitError),
}

impl ToolError {
    /// Structured payload that survived the failure, if any.
    pub fn result(&self) -> Option<Value> {
        match self {
            ToolError::Git(err) => err
                .result()
                .and_then(|result| serde_json::to_value(result).ok()),
            _ => None,
        }
    }
}

pub type ToolResult<T> = Result<T, ToolError>;

/// A successful tool call: structured result plus text for the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub result: Value,
    pub summary: String,
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;
    async fn execute(&self, ctx: &ExecutionContext, args: Value) -> ToolResult<ToolOutput>;
    fn name(&self) -> &str;
}

pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    pub fn get_tool(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn list_tools(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn get_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    pub async fn execute(
        &self,
        name: &str,
        ctx: &ExecutionContext,
        args: Value,
    ) -> ToolResult<ToolOutput> {
        match self.tools.get(name) {
            Some(tool) => tool.execute(ctx, args).await,
            None => Err(ToolError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Runs a protocol-level call and always answers it, errors included.
    pub async fn handle_call(&self, ctx: &ExecutionContext, call: ToolCall) -> ToolResponse {
        match self
            .execute(&call.function.name, ctx, call.function.arguments)
            .await
        {
            Ok(output) => ToolResponse::success(call.id, output.summary, output.result),
            Err(e) => ToolResponse::error(call.id, format!("Error: {}", e), e.result()),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::types::{FunctionDefinition, JsonSchema, SchemaType};
    use serde_json::json;

    struct UppercaseTool;

    #[async_trait]
    impl Tool for UppercaseTool {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition {
                function: FunctionDefinition {
                    name: "upper".to_string(),
                    description: "Uppercase a string".to_string(),
                    parameters: JsonSchema {
                        schema_type: SchemaType::Object,
                        properties: None,
                        required: Some(vec!["text".to_string()]),
                    },
                },
            }
        }

        async fn execute(&self, _ctx: &ExecutionContext, args: Value) -> ToolResult<ToolOutput> {
            let text = args.get("text").and_then(|v| v.as_str()).ok_or_else(|| {
                ToolError::InvalidArguments {
                    message: "Missing or invalid 'text' parameter".to_string(),
                }
            })?;
            Ok(ToolOutput {
                result: json!({ "text": text.to_uppercase() }),
                summary: text.to_uppercase(),
            })
        }

        fn name(&self) -> &str {
            "upper"
        }
    }

    #[tokio::test]
    async fn test_tool_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(UppercaseTool));

        assert_eq!(registry.list_tools(), ["upper"]);
        assert!(registry.get_tool("upper").is_some());
        assert!(registry.get_tool("nonexistent").is_none());
        assert_eq!(registry.get_definitions().len(), 1);

        let ctx = ExecutionContext::new();
        let output = registry
            .execute("upper", &ctx, json!({ "text": "abc" }))
            .await
            .unwrap();
        assert_eq!(output.result["text"], "ABC");

        let missing = registry.execute("nonexistent", &ctx, json!({})).await;
        assert!(matches!(missing, Err(ToolError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_handle_call_reports_errors_as_responses() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(UppercaseTool));
        let ctx = ExecutionContext::new();

        let ok = registry
            .handle_call(&ctx, ToolCall::new("1", "upper", json!({ "text": "hi" })))
            .await;
        assert!(!ok.is_error);
        assert_eq!(ok.tool_call_id, "1");
        assert_eq!(ok.content, "HI");

        let bad = registry
            .handle_call(&ctx, ToolCall::new("2", "upper", json!({})))
            .await;
        assert!(bad.is_error);
        assert!(bad.content.starts_with("Error: Invalid arguments"));
        assert!(bad.result.is_none());

        let unknown = registry
            .handle_call(&ctx, ToolCall::new("3", "nope", json!({})))
            .await;
        assert!(unknown.is_error);
        assert_eq!(unknown.content, "Error: Tool not found: nope");
    }
}
