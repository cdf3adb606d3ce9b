//! Configuration types for Toolsmith core
//!
//! Core only accepts fully resolved, validated credentials. Environment
//! lookup is injected so resolution stays testable without mutating the
//! real process environment.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Environment variable consulted when no OpenAI key is provided explicitly.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable consulted when no SerpApi key is provided explicitly.
pub const SERP_API_KEY_VAR: &str = "SERP_API_KEY";

/// Lookup function for environment fallback during credential resolution.
pub type EnvLookup = dyn Fn(&str) -> Option<String>;

/// Caller-supplied toolkit configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// OpenAI API key; falls back to `OPENAI_API_KEY` when absent
    pub openai_api_key: Option<String>,

    /// SerpApi key for the web search tool; falls back to `SERP_API_KEY`
    pub serp_api_key: Option<String>,

    /// Emit debug traces around each model invocation
    #[serde(default)]
    pub log_to_console: bool,
}

impl ToolkitConfig {
    /// Create an empty configuration (all fallbacks from the environment)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the OpenAI API key
    pub fn with_openai_api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Set the SerpApi key
    pub fn with_serp_api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.serp_api_key = Some(key.into());
        self
    }

    /// Enable console logging of model invocations
    pub fn with_console_logging(mut self, enabled: bool) -> Self {
        self.log_to_console = enabled;
        self
    }
}

/// Fully resolved credentials ready for use by core
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    /// API key for the model provider
    pub openai_api_key: String,

    /// API key for the search provider
    pub serp_api_key: String,

    /// Whether to emit debug traces around model invocations
    pub log_to_console: bool,
}

impl ResolvedCredentials {
    /// Resolve credentials from explicit configuration first, then the
    /// injected environment lookup. Missing either credential from both
    /// sources is a fatal construction error.
    pub fn resolve(config: ToolkitConfig, env: &EnvLookup) -> Result<Self> {
        let openai_api_key = Self::resolve_one(
            config.openai_api_key,
            env,
            "openAIApiKey",
            OPENAI_API_KEY_VAR,
        )?;
        let serp_api_key =
            Self::resolve_one(config.serp_api_key, env, "serpApiKey", SERP_API_KEY_VAR)?;

        Ok(Self {
            openai_api_key,
            serp_api_key,
            log_to_console: config.log_to_console,
        })
    }

    /// Resolve using the real process environment.
    pub fn from_env(config: ToolkitConfig) -> Result<Self> {
        Self::resolve(config, &|var| std::env::var(var).ok())
    }

    fn resolve_one(
        explicit: Option<String>,
        env: &EnvLookup,
        name: &str,
        env_var: &str,
    ) -> Result<String> {
        explicit
            .filter(|k| !k.is_empty())
            .or_else(|| env(env_var).filter(|k| !k.is_empty()))
            .ok_or_else(|| {
                ConfigError::MissingCredential {
                    name: name.to_string(),
                    env_var: env_var.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_explicit_keys_resolve_without_env() {
        let config = ToolkitConfig::new()
            .with_openai_api_key("k1")
            .with_serp_api_key("k2");

        let resolved = ResolvedCredentials::resolve(config, &no_env).unwrap();
        assert_eq!(resolved.openai_api_key, "k1");
        assert_eq!(resolved.serp_api_key, "k2");
        assert!(!resolved.log_to_console);
    }

    #[test]
    fn test_env_fallback_fills_missing_keys() {
        let config = ToolkitConfig::new().with_openai_api_key("explicit");

        let resolved = ResolvedCredentials::resolve(config, &|var| {
            (var == SERP_API_KEY_VAR).then(|| "from-env".to_string())
        })
        .unwrap();

        assert_eq!(resolved.openai_api_key, "explicit");
        assert_eq!(resolved.serp_api_key, "from-env");
    }

    #[test]
    fn test_missing_both_sources_is_fatal() {
        let err = ResolvedCredentials::resolve(ToolkitConfig::new(), &no_env).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("openAIApiKey"));
        assert!(message.contains(OPENAI_API_KEY_VAR));
    }

    #[test]
    fn test_empty_explicit_key_falls_back() {
        let config = ToolkitConfig::new()
            .with_openai_api_key("")
            .with_serp_api_key("k2");

        let err = ResolvedCredentials::resolve(config, &no_env).unwrap_err();
        assert!(err.to_string().contains("openAIApiKey"));
    }
}
