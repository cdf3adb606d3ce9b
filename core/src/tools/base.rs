//! Base lookup-tool trait and function-calling bridge

use crate::llm::{FunctionDefinition, ToolDefinition};
use async_trait::async_trait;
use serde_json::json;

/// A lookup tool the agent loop can consult while generating.
///
/// `call` never fails: every failure, including an empty result set, is
/// normalized into an `"Error: <cause>"` string. The result is consumed by
/// the model as plain text inside a longer transcript, where a raised
/// error would break the agent loop instead of letting it reason about
/// the failure.
#[async_trait]
pub trait LookupTool: Send + Sync {
    /// Name the model uses to invoke the tool
    fn name(&self) -> &str;

    /// Description consumed verbatim by the model in the action listing
    fn description(&self) -> &str;

    /// Run a single string query against the backing service
    async fn call(&self, query: &str) -> String;
}

/// Build the function-calling definition for a lookup tool.
///
/// Every lookup tool shares the same single-parameter shape: a required
/// string `query`.
pub fn definition_for(tool: &dyn LookupTool) -> ToolDefinition {
    ToolDefinition {
        tool_type: "function".to_string(),
        function: FunctionDefinition {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The query string to look up"
                    }
                },
                "required": ["query"]
            }),
        },
    }
}

/// Extract the query string from a function-calling input value.
///
/// Models occasionally send a bare string instead of the object shape;
/// accept both rather than failing the loop.
pub fn query_from_input(input: &serde_json::Value) -> String {
    match input {
        serde_json::Value::String(s) => s.clone(),
        other => other
            .get("query")
            .and_then(|q| q.as_str())
            .unwrap_or_default()
            .to_string(),
    }
}
