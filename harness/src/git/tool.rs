use super::adapter::GitAdapter;
use super::request::GitRequest;
use super::types::Operation;
use crate::config::AdapterConfig;
use crate::context::ExecutionContext;
use crate::tools::{Tool, ToolOutput, ToolResult};
use async_trait::async_trait;
use protocol::types::{
    FunctionDefinition, JsonSchema, PropertySchema, SchemaType, ToolDefinition,
};
use serde_json::Value;
use std::collections::HashMap;

pub const GIT_TOOL_NAME: &str = "git_mcp";

/// The git adapter behind the generic [`Tool`] interface.
pub struct GitTool {
    adapter: GitAdapter,
}

impl GitTool {
    pub fn new(config: AdapterConfig) -> Self {
        Self::with_adapter(GitAdapter::new(config))
    }

    pub fn with_adapter(adapter: GitAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for GitTool {
    fn definition(&self) -> ToolDefinition {
        let options = PropertySchema::new(
            SchemaType::Object,
            "Additional options for the git command",
        )
        .with_property(
            "limit",
            PropertySchema::new(
                SchemaType::Integer,
                "Limit number of results (for log operation)",
            ),
        )
        .with_property(
            "oneline",
            PropertySchema::new(
                SchemaType::Boolean,
                "Show one line per entry (for log operation)",
            ),
        )
        .with_property(
            "cached",
            PropertySchema::new(
                SchemaType::Boolean,
                "Show cached/staged changes (for diff operation)",
            ),
        );

        let mut props = HashMap::new();
        props.insert(
            "operation".to_string(),
            PropertySchema::string("Git operation to perform")
                .with_enum(Operation::ALL.iter().map(Operation::as_str)),
        );
        props.insert(
            "repository".to_string(),
            PropertySchema::string("Repository URL (for clone operation)"),
        );
        props.insert(
            "path".to_string(),
            PropertySchema::string("Local path for the repository or files"),
        );
        props.insert(
            "message".to_string(),
            PropertySchema::string("Commit message (for commit operation)"),
        );
        props.insert(
            "branch".to_string(),
            PropertySchema::string("Branch name (for branch/checkout operations)"),
        );
        props.insert(
            "files".to_string(),
            PropertySchema::array_of(
                PropertySchema::string("File path"),
                "Files to add (for add operation)",
            ),
        );
        props.insert("options".to_string(), options);

        ToolDefinition {
            function: FunctionDefinition {
                name: GIT_TOOL_NAME.to_string(),
                description: "Execute git operations. Supports clone, status, log, diff, add, \
                              commit, push, pull, branch, checkout and init operations."
                    .to_string(),
                parameters: JsonSchema {
                    schema_type: SchemaType::Object,
                    properties: Some(props),
                    required: Some(vec!["operation".to_string()]),
                },
            },
        }
    }

    async fn execute(&self, ctx: &ExecutionContext, args: Value) -> ToolResult<ToolOutput> {
        let request = GitRequest::from_args(&args)?;
        let execution = self.adapter.execute(ctx, &request).await?;

        Ok(ToolOutput {
            result: serde_json::to_value(&execution.result)?,
            summary: execution.summary,
        })
    }

    fn name(&self) -> &str {
        GIT_TOOL_NAME
    }
}
