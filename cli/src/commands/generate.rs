//! Generate command

use anyhow::{Context, Result};
use std::path::PathBuf;
use toolsmith_core::{Toolkit, ToolkitConfig};

/// Generate a tool and emit the formatted module.
pub async fn generate_command(
    config: ToolkitConfig,
    request: String,
    simple: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let toolkit = Toolkit::new(config).context("failed to construct toolkit")?;

    // Accept either a raw JSON request object or plain text.
    let input = serde_json::from_str(&request)
        .unwrap_or_else(|_| serde_json::json!({ "request": request }));

    // The facade flag is inverted: `true` selects the single-call chain.
    let tool = toolkit
        .generate_tool(&input, simple)
        .await
        .context("tool generation failed")?;

    tracing::info!(slug = %tool.tool.slug, "generated tool");
    super::emit(&tool.formatted_code, output)
}
