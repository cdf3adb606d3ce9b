//! Error types and handling for Toolsmith Core

use thiserror::Error;

/// Result type alias for Toolsmith operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Toolsmith Core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// LLM client errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Generation chain errors
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    /// Model response parsing/validation errors
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Tool formatting errors
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required credential '{name}': not provided and {env_var} is unset")]
    MissingCredential { name: String, env_var: String },
}

/// LLM client errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("API error: {message}")]
    ApiError { message: String },
}

/// Generation chain errors
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Response is missing required output field '{field}', received: {received}")]
    MissingOutputField { field: String, received: String },

    #[error("Agent loop exhausted {max_steps} steps without a final answer")]
    StepsExhausted { max_steps: usize },
}

/// Model response parsing/validation errors
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("Model response is not valid JSON: {raw}")]
    InvalidJson { raw: String },

    #[error("Model response does not match the tool shape: {}", violations.join("; "))]
    SchemaViolation { violations: Vec<String> },
}

/// Tool formatting errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Generated code is not valid JavaScript: {detail}")]
    Syntax { detail: String },

    #[error("Failed to load JavaScript grammar: {0}")]
    Grammar(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}
