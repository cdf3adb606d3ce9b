//! CLI command implementations

pub mod generate;
pub mod iterate;

pub use generate::generate_command;
pub use iterate::iterate_command;

use toolsmith_core::ToolkitConfig;

/// Assemble the toolkit configuration from CLI flags.
pub fn build_config(
    openai_api_key: &Option<String>,
    serp_api_key: &Option<String>,
    verbose: bool,
) -> ToolkitConfig {
    let mut config = ToolkitConfig::new().with_console_logging(verbose);

    if let Some(key) = openai_api_key {
        config = config.with_openai_api_key(key);
    }
    if let Some(key) = serp_api_key {
        config = config.with_serp_api_key(key);
    }

    config
}

/// Print or write a generated module.
pub(crate) fn emit(
    module: &str,
    output: Option<std::path::PathBuf>,
) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, module)?;
            tracing::info!("wrote {}", path.display());
        }
        None => println!("{}", module),
    }
    Ok(())
}
