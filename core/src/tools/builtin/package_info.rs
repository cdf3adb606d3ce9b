//! npm package documentation lookup

use crate::tools::builtin::NPM_REGISTRY_URL;
use crate::tools::LookupTool;
use async_trait::async_trait;
use serde::Deserialize;

/// Looks up a single npm package by exact name and returns its
/// documentation text.
pub struct PackageInfoTool {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PackageDocument {
    readme: Option<String>,
    description: Option<String>,
}

impl PackageInfoTool {
    pub fn new() -> Self {
        Self::with_base_url(NPM_REGISTRY_URL)
    }

    /// Point the tool at a different registry endpoint (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn lookup(&self, name: &str) -> Result<String, reqwest::Error> {
        let url = format!("{}/{}", self.base_url, name.trim());
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok("No details available".to_string());
        }

        let document: PackageDocument = response.error_for_status()?.json().await?;
        Ok(document
            .readme
            .filter(|r| !r.trim().is_empty())
            .or(document.description)
            .unwrap_or_else(|| "No details available".to_string()))
    }
}

impl Default for PackageInfoTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LookupTool for PackageInfoTool {
    fn name(&self) -> &str {
        "npm-info"
    }

    fn description(&self) -> &str {
        "Look up an npm package by its exact name. Input is the package name; \
         output is the package documentation, or 'No details available' if the \
         package does not exist."
    }

    async fn call(&self, query: &str) -> String {
        match self.lookup(query).await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("npm-info lookup failed: {}", e);
                format!("Error: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transport_failure_is_a_string_not_an_error() {
        // Nothing listens on the discard port; the request fails fast.
        let tool = PackageInfoTool::with_base_url("http://127.0.0.1:9");
        let result = tool.call("left-pad").await;
        assert!(result.starts_with("Error: "), "got: {}", result);
    }
}
