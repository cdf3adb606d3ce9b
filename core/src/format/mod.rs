//! Response formatting
//!
//! Turns a validated tool into the second representation an agent
//! framework can load: derives the slug and class name, checks that the
//! generated code parses as JavaScript, and renders the module template.
//! The whole derivation is pure: the same base tool always produces
//! byte-identical output.

use crate::error::{FormatError, Result};
use crate::templates::{escape_prompt_braces, TemplateStore};
use crate::tool::{BaseTool, FormattedTool, GeneratedTool};
use serde_json::json;
use std::sync::Arc;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Derive an identifier-safe slug from a human-readable name.
///
/// Unicode-normalizes first (NFKD decomposition, combining marks
/// stripped, so `è` becomes `e`), then lowercases letters, keeps digits,
/// and collapses every other character run (whitespace, punctuation,
/// remaining non-ASCII) into a single hyphen. Deterministic; distinct
/// names may collide.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Pascal-case a slug for use as a class name.
pub fn pascal_case(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Check that the generated code parses as JavaScript.
fn check_syntax(code: &str) -> Result<()> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .map_err(|e| FormatError::Grammar(e.to_string()))?;

    let tree = parser
        .parse(code, None)
        .ok_or_else(|| FormatError::Syntax {
            detail: "parser produced no tree".to_string(),
        })?;

    if tree.root_node().has_error() {
        let detail = first_error_position(tree.root_node())
            .map(|(row, column)| format!("syntax error at line {}, column {}", row + 1, column + 1))
            .unwrap_or_else(|| "syntax error".to_string());
        return Err(FormatError::Syntax { detail }.into());
    }

    Ok(())
}

fn first_error_position(node: tree_sitter::Node) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        let position = node.start_position();
        return Some((position.row, position.column));
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_position(child) {
            return Some(found);
        }
    }
    None
}

/// Renders validated tools into the agent-framework module shape.
pub struct ToolFormatter {
    templates: Arc<TemplateStore>,
}

impl ToolFormatter {
    pub fn new(templates: Arc<TemplateStore>) -> Self {
        Self { templates }
    }

    /// Attach the derived slug to a parsed tool.
    pub fn derive_base(&self, tool: GeneratedTool) -> BaseTool {
        let slug = slugify(&tool.name);
        BaseTool { tool, slug }
    }

    /// Render the agent-framework module for a base tool.
    ///
    /// Fails if the code is not syntactically valid JavaScript. The input
    /// schema is appended to the model-facing description with its braces
    /// doubled so downstream prompt templates do not read the schema text
    /// as placeholders.
    pub fn format(&self, base: BaseTool) -> Result<FormattedTool> {
        check_syntax(base.code())?;

        let class_name = pascal_case(&base.slug);
        let input_schema = serde_json::to_string_pretty(&base.tool.input_schema)?;
        let output_schema = serde_json::to_string_pretty(&base.tool.output_schema)?;

        let description = format!(
            "{} Input schema: {}",
            base.description(),
            escape_prompt_braces(&input_schema)
        );

        let formatted_code = self.templates.render_tool_class(&json!({
            "className": class_name,
            "slug": base.slug,
            "code": base.code(),
            "description": description,
            "inputSchema": input_schema,
            "outputSchema": output_schema,
        }))?;

        Ok(FormattedTool {
            tool: base,
            formatted_code,
        })
    }
}
