//! Minimal configuration module for Toolsmith core
//!
//! Only exports pure data types plus the credential resolution step.

pub mod types;

pub use types::{EnvLookup, ResolvedCredentials, ToolkitConfig, OPENAI_API_KEY_VAR, SERP_API_KEY_VAR};
