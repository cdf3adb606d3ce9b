//! Tool data model
//!
//! A "tool" here is the artifact this toolkit produces: a generated unit of
//! functionality with a name, description, JSON input/output schema, and
//! source code. It is distinct from the lookup tools used internally to
//! assist generation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool as parsed from the model's raw text response.
///
/// `input_schema` and `output_schema` are arbitrary JSON objects; the
/// recursive value domain is carried by `serde_json::Value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTool {
    /// Human-readable name
    pub name: String,

    /// What the tool does and when to use it
    pub description: String,

    /// JSON schema for the tool's input
    #[serde(rename = "inputSchema", default = "empty_object")]
    pub input_schema: Value,

    /// JSON schema for the tool's output
    #[serde(rename = "outputSchema", default = "empty_object")]
    pub output_schema: Value,

    /// JavaScript implementation
    pub code: String,
}

/// A generated tool with its derived identifier.
///
/// The slug is a deterministic function of `name`; two distinct names may
/// collide to the same slug and no collision detection is performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseTool {
    #[serde(flatten)]
    pub tool: GeneratedTool,

    /// URL/identifier-safe transformation of `name`
    pub slug: String,
}

/// A base tool plus the rendered agent-framework module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTool {
    #[serde(flatten)]
    pub tool: BaseTool,

    /// Module source exporting a class-shaped tool for the agent framework
    pub formatted_code: String,
}

/// Input for refining a previously generated tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationInput {
    /// The prior tool (or a compatible shape), serialized verbatim into
    /// the revision prompt
    pub tool: Value,

    /// Free-form execution/test feedback
    pub logs: String,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl BaseTool {
    /// Shorthand accessors to the underlying generated tool fields.
    pub fn name(&self) -> &str {
        &self.tool.name
    }

    pub fn description(&self) -> &str {
        &self.tool.description
    }

    pub fn code(&self) -> &str {
        &self.tool.code
    }
}
