//! # toolsmith CLI
//!
//! Command-line interface for Toolsmith - LLM-backed synthesis of agent
//! tools.
//!
//! ## Usage
//!
//! - `toolsmith generate "a tool that parses CSV"` - Generate a tool
//! - `toolsmith iterate --tool tool.json --logs run.log` - Refine a tool

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{generate_command, iterate_command};

/// toolsmith - generate agent tools from natural-language requests
#[derive(Parser)]
#[command(name = "toolsmith")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "LLM-backed synthesis of agent tools")]
#[command(long_about = None)]
struct Cli {
    /// OpenAI API key override (falls back to OPENAI_API_KEY)
    #[arg(long)]
    openai_api_key: Option<String>,

    /// SerpApi key override (falls back to SERP_API_KEY)
    #[arg(long)]
    serp_api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new tool from a request
    Generate {
        /// What the tool should do; free text, or a JSON object for
        /// structured requests
        request: String,

        /// Skip the lookup-tool agent and make a single model call
        #[arg(long)]
        simple: bool,

        /// Write the generated module here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Refine a previously generated tool using its run logs
    Iterate {
        /// Path to the prior tool JSON document
        #[arg(long)]
        tool: PathBuf,

        /// Path to a file with execution/test feedback
        #[arg(long)]
        logs: PathBuf,

        /// Write the revised module here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    toolsmith_core::init_tracing_with_debug(cli.verbose);

    let config = commands::build_config(&cli.openai_api_key, &cli.serp_api_key, cli.verbose);

    match cli.command {
        Commands::Generate {
            request,
            simple,
            output,
        } => generate_command(config, request, simple, output).await,
        Commands::Iterate { tool, logs, output } => {
            iterate_command(config, tool, logs, output).await
        }
    }
}
