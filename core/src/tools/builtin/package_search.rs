//! npm package free-text search

use crate::tools::builtin::NPM_REGISTRY_URL;
use crate::tools::LookupTool;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const SEARCH_RESULT_LIMIT: u32 = 10;

/// Searches npm packages by free-text query and returns a JSON array of
/// `{name, description, score}` hits.
pub struct PackageSearchTool {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    objects: Vec<SearchObject>,
}

#[derive(Debug, Deserialize)]
struct SearchObject {
    package: SearchPackage,
    score: SearchScore,
}

#[derive(Debug, Deserialize)]
struct SearchPackage {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchScore {
    #[serde(rename = "final")]
    final_score: f64,
}

/// One hit in the serialized result array.
#[derive(Debug, Serialize)]
pub(crate) struct SearchHit {
    pub name: String,
    pub description: String,
    pub score: f64,
}

impl PackageSearchTool {
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

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, reqwest::Error> {
        let url = format!("{}/-/v1/search", self.base_url);
        let size = SEARCH_RESULT_LIMIT.to_string();
        let response: SearchResponse = self
            .client
            .get(&url)
            .query(&[("text", query), ("size", size.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .objects
            .into_iter()
            .map(|object| SearchHit {
                name: object.package.name,
                description: object.package.description.unwrap_or_default(),
                score: object.score.final_score,
            })
            .collect())
    }
}

impl Default for PackageSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize hits for the model, normalizing the empty set into an error
/// string the agent loop can act on.
pub(crate) fn render_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "Error: no results".to_string();
    }
    serde_json::to_string(hits).unwrap_or_else(|e| format!("Error: {}", e))
}

#[async_trait]
impl LookupTool for PackageSearchTool {
    fn name(&self) -> &str {
        "npm-search"
    }

    fn description(&self) -> &str {
        "Search npm packages by free-text query. Input is the search text; \
         output is a JSON array of {name, description, score} for the best \
         matching packages."
    }

    async fn call(&self, query: &str) -> String {
        match self.search(query).await {
            Ok(hits) => render_hits(&hits),
            Err(e) => {
                tracing::debug!("npm-search failed: {}", e);
                format!("Error: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_set_is_an_error_string() {
        assert_eq!(render_hits(&[]), "Error: no results");
    }

    #[test]
    fn test_hits_serialize_as_json_array() {
        let hits = vec![SearchHit {
            name: "csv-parse".to_string(),
            description: "CSV parsing".to_string(),
            score: 0.91,
        }];
        let rendered = render_hits(&hits);
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0]["name"], "csv-parse");
        assert_eq!(parsed[0]["score"], 0.91);
    }

    #[tokio::test]
    async fn test_transport_failure_is_a_string_not_an_error() {
        let tool = PackageSearchTool::with_base_url("http://127.0.0.1:9");
        let result = tool.call("csv").await;
        assert!(result.starts_with("Error: "), "got: {}", result);
    }
}
