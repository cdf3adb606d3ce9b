//! Web search via SerpApi

use crate::tools::LookupTool;
use async_trait::async_trait;

const SERPAPI_URL: &str = "https://serpapi.com";

/// Delegates a query to SerpApi keyed by the caller-supplied credential.
///
/// Result format and failure behavior are owned by the provider and passed
/// through unchanged; only transport failures are normalized locally.
pub struct WebSearchTool {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WebSearchTool {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(SERPAPI_URL, api_key)
    }

    /// Point the tool at a different endpoint (used by tests).
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn search(&self, query: &str) -> Result<String, reqwest::Error> {
        let url = format!("{}/search.json", self.base_url);
        self.client
            .get(&url)
            .query(&[("q", query), ("api_key", self.api_key.as_str())])
            .send()
            .await?
            .text()
            .await
    }
}

#[async_trait]
impl LookupTool for WebSearchTool {
    fn name(&self) -> &str {
        "web-search"
    }

    fn description(&self) -> &str {
        "Search the web for current information. Input is a search query; \
         output is the raw search result payload."
    }

    async fn call(&self, query: &str) -> String {
        match self.search(query).await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("web search failed: {}", e);
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
        let tool = WebSearchTool::with_base_url("http://127.0.0.1:9", "key");
        let result = tool.call("weather").await;
        assert!(result.starts_with("Error: "), "got: {}", result);
    }
}
