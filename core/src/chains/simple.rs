//! Single-call generation chain (no lookup tools)

use crate::error::{ChainError, Result};
use crate::llm::{ChatOptions, LlmClient, LlmMessage};
use crate::templates::TemplateStore;
use std::sync::Arc;

/// Renders the generation prompt and makes exactly one model call.
pub struct SimpleChain {
    llm: Arc<dyn LlmClient>,
    templates: Arc<TemplateStore>,
    log_to_console: bool,
}

impl SimpleChain {
    pub fn new(llm: Arc<dyn LlmClient>, templates: Arc<TemplateStore>, log_to_console: bool) -> Self {
        Self {
            llm,
            templates,
            log_to_console,
        }
    }

    /// Generate a tool for the serialized request, returning the raw text
    /// response. Fails if the response carries no text.
    pub async fn generate(&self, input: &serde_json::Value) -> Result<String> {
        let prompt = self.templates.render_generate(input)?;

        if self.log_to_console {
            tracing::debug!(model = self.llm.model_name(), "simple chain: invoking model");
        }

        let response = self
            .llm
            .chat_completion(vec![LlmMessage::user(prompt)], None, Some(ChatOptions::default()))
            .await?;

        if self.log_to_console {
            tracing::debug!("simple chain: model responded");
        }

        let text = response.message.get_text().unwrap_or_default();
        if text.trim().is_empty() {
            return Err(ChainError::MissingOutputField {
                field: "text".to_string(),
                received: format!("{:?}", response.message),
            }
            .into());
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::agent::testing::ScriptedClient;
    use serde_json::json;

    #[tokio::test]
    async fn test_returns_raw_text_response() {
        let client = Arc::new(ScriptedClient::new(vec![ScriptedClient::text("{}")]));
        let chain = SimpleChain::new(client.clone(), Arc::new(TemplateStore::new()), false);

        let output = chain.generate(&json!({"request": "add numbers"})).await.unwrap();
        assert_eq!(output, "{}");

        // The prompt must embed the serialized request verbatim.
        let requests = client.requests.lock().unwrap();
        let prompt = requests[0][0].get_text().unwrap();
        assert!(prompt.contains("add numbers"));
    }

    #[tokio::test]
    async fn test_empty_response_names_text_field() {
        let client = Arc::new(ScriptedClient::new(vec![ScriptedClient::text("  ")]));
        let chain = SimpleChain::new(client, Arc::new(TemplateStore::new()), false);

        let err = chain.generate(&json!({})).await.unwrap_err();
        assert!(err.to_string().contains("'text'"));
    }
}
