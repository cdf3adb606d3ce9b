//! Static prompt and output templates
//!
//! All template text is embedded at compile time from `core/templates/` and
//! treated as immutable configuration. Rendering goes through a single
//! handlebars registry with HTML escaping disabled, since every render
//! target is either a model prompt or JavaScript source.

use crate::error::Result;
use handlebars::Handlebars;
use serde_json::json;

/// The tool specification document embedded in every generation prompt.
const TOOL_SPEC: &str = include_str!("../../templates/tool-spec.md");

const GENERATE_TEMPLATE: &str = include_str!("../../templates/generate.hbs");
const EXECUTOR_TEMPLATE: &str = include_str!("../../templates/executor.hbs");
const ITERATE_TEMPLATE: &str = include_str!("../../templates/iterate.hbs");
const TOOL_CLASS_TEMPLATE: &str = include_str!("../../templates/tool-class.hbs");

/// Store for the static prompt templates and the output code template.
pub struct TemplateStore {
    registry: Handlebars<'static>,
}

impl TemplateStore {
    /// Build the store with all templates registered.
    ///
    /// Registration failures are programming errors in the embedded
    /// template text, so they panic at construction rather than surfacing
    /// as runtime results.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);

        for (name, text) in [
            ("generate", GENERATE_TEMPLATE),
            ("executor", EXECUTOR_TEMPLATE),
            ("iterate", ITERATE_TEMPLATE),
            ("tool_class", TOOL_CLASS_TEMPLATE),
        ] {
            registry
                .register_template_string(name, text)
                .unwrap_or_else(|e| panic!("invalid embedded template '{}': {}", name, e));
        }

        Self { registry }
    }

    /// Render the single-shot generation prompt for a serialized request.
    pub fn render_generate(&self, input: &serde_json::Value) -> Result<String> {
        let prompt = self.registry.render(
            "generate",
            &json!({
                "spec": TOOL_SPEC,
                "input": serde_json::to_string_pretty(input)?,
            }),
        )?;
        Ok(prompt)
    }

    /// Render the agent-executor wrapper around a generation instruction,
    /// listing the available lookup actions by name and description.
    pub fn render_executor(&self, instruction: &str, tools: &[(String, String)]) -> Result<String> {
        let tool_entries: Vec<serde_json::Value> = tools
            .iter()
            .map(|(name, description)| json!({"name": name, "description": description}))
            .collect();

        let prompt = self.registry.render(
            "executor",
            &json!({
                "instruction": instruction,
                "tools": tool_entries,
            }),
        )?;
        Ok(prompt)
    }

    /// Render the revision prompt embedding a prior tool and its run logs.
    pub fn render_iterate(&self, tool: &serde_json::Value, logs: &str) -> Result<String> {
        let prompt = self.registry.render(
            "iterate",
            &json!({
                "spec": TOOL_SPEC,
                "tool": serde_json::to_string_pretty(tool)?,
                "logs": logs,
            }),
        )?;
        Ok(prompt)
    }

    /// Render the agent-framework module for a formatted tool.
    pub fn render_tool_class(&self, data: &serde_json::Value) -> Result<String> {
        Ok(self.registry.render("tool_class", data)?)
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Double every brace so structured text can be embedded inside a
/// prompt-template string without being read as a placeholder by the
/// downstream templating engine.
pub fn escape_prompt_braces(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '{' => escaped.push_str("{{"),
            '}' => escaped.push_str("}}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_prompt_embeds_spec_and_input() {
        let store = TemplateStore::new();
        let prompt = store
            .render_generate(&json!({"request": "parse CSV rows"}))
            .unwrap();

        assert!(prompt.contains("A Tool is a small, self-contained unit"));
        assert!(prompt.contains("parse CSV rows"));
    }

    #[test]
    fn test_executor_prompt_lists_tools() {
        let store = TemplateStore::new();
        let tools = vec![
            ("npm-info".to_string(), "Look up one package".to_string()),
            ("npm-search".to_string(), "Search packages".to_string()),
        ];
        let prompt = store.render_executor("Do the thing.", &tools).unwrap();

        assert!(prompt.contains("- npm-info: Look up one package"));
        assert!(prompt.contains("- npm-search: Search packages"));
        assert!(prompt.contains("Do the thing."));
    }

    #[test]
    fn test_iterate_prompt_embeds_tool_and_logs() {
        let store = TemplateStore::new();
        let tool = json!({"name": "Adder", "code": "async function run(i) { return i.a + i.b; }"});
        let prompt = store
            .render_iterate(&tool, "test failed: expected 3 got 4")
            .unwrap();

        assert!(prompt.contains("\"name\": \"Adder\""));
        assert!(prompt.contains("test failed: expected 3 got 4"));
    }

    #[test]
    fn test_escape_prompt_braces_doubles_braces() {
        assert_eq!(
            escape_prompt_braces(r#"{"type": "object"}"#),
            r#"{{"type": "object"}}"#
        );
        assert_eq!(escape_prompt_braces("no braces"), "no braces");
    }
}
