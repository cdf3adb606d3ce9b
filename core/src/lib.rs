//! # Toolsmith Core
//!
//! Core library for Toolsmith - LLM-backed synthesis of agent tools.
//!
//! The toolkit turns a natural-language request into a small, self-contained
//! tool (name, description, JSON schemas, implementation code), optionally
//! consulting package-registry and web-search lookup tools through an agent
//! loop, then validates and formats the result into an agent-framework
//! module.

// Core modules
pub mod chains;
pub mod config;
pub mod error;
pub mod format;
pub mod llm;
pub mod templates;
pub mod tool;
pub mod toolkit;
pub mod tools;

// Re-export commonly used types
pub use config::ToolkitConfig;
pub use tool::{BaseTool, FormattedTool, GeneratedTool, IterationInput};
pub use toolkit::Toolkit;

/// Current version of the toolsmith-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
