//! Iterate command

use anyhow::{Context, Result};
use std::path::PathBuf;
use toolsmith_core::{IterationInput, Toolkit, ToolkitConfig};

/// Refine a previously generated tool using its run logs.
pub async fn iterate_command(
    config: ToolkitConfig,
    tool_path: PathBuf,
    logs_path: PathBuf,
    output: Option<PathBuf>,
) -> Result<()> {
    let toolkit = Toolkit::new(config).context("failed to construct toolkit")?;

    let tool_text = std::fs::read_to_string(&tool_path)
        .with_context(|| format!("failed to read {}", tool_path.display()))?;
    let tool = serde_json::from_str(&tool_text)
        .with_context(|| format!("{} is not valid JSON", tool_path.display()))?;
    let logs = std::fs::read_to_string(&logs_path)
        .with_context(|| format!("failed to read {}", logs_path.display()))?;

    let revised = toolkit
        .iterate_tool(&IterationInput { tool, logs })
        .await
        .context("tool iteration failed")?;

    tracing::info!(slug = %revised.tool.slug, "revised tool");
    super::emit(&revised.formatted_code, output)
}
