pub mod types;

pub use types::{
    FunctionCall, FunctionDefinition, JsonSchema, PropertySchema, SchemaType, ToolCall,
    ToolDefinition, ToolResponse,
};

pub mod prelude {
    pub use crate::types::*;
}
