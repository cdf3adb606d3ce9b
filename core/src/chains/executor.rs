//! Agent-executor generation chain

use crate::chains::agent::run_agent_loop;
use crate::error::Result;
use crate::llm::LlmClient;
use crate::templates::TemplateStore;
use crate::tools::LookupTool;
use std::sync::Arc;

/// Wraps the generation instruction in the agent-executor prompt and runs
/// the lookup-tool loop until the model produces a final answer.
pub struct ExecutorChain {
    llm: Arc<dyn LlmClient>,
    templates: Arc<TemplateStore>,
    tools: Vec<Arc<dyn LookupTool>>,
    log_to_console: bool,
}

impl ExecutorChain {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        templates: Arc<TemplateStore>,
        tools: Vec<Arc<dyn LookupTool>>,
        log_to_console: bool,
    ) -> Self {
        Self {
            llm,
            templates,
            tools,
            log_to_console,
        }
    }

    fn tool_listing(&self) -> Vec<(String, String)> {
        self.tools
            .iter()
            .map(|t| (t.name().to_string(), t.description().to_string()))
            .collect()
    }

    /// Generate a tool for the serialized request, consulting the lookup
    /// tools as the model sees fit.
    pub async fn generate(&self, input: &serde_json::Value) -> Result<String> {
        let instruction = self.templates.render_generate(input)?;
        let prompt = self
            .templates
            .render_executor(&instruction, &self.tool_listing())?;

        run_agent_loop(
            self.llm.as_ref(),
            &self.tools,
            prompt,
            "output",
            self.log_to_console,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::agent::testing::ScriptedClient;
    use crate::tools::LookupTool;
    use async_trait::async_trait;
    use serde_json::json;

    struct StubSearch;

    #[async_trait]
    impl LookupTool for StubSearch {
        fn name(&self) -> &str {
            "npm-search"
        }

        fn description(&self) -> &str {
            "Search npm packages"
        }

        async fn call(&self, _query: &str) -> String {
            "Error: no results".to_string()
        }
    }

    #[tokio::test]
    async fn test_prompt_lists_actions_and_embeds_instruction() {
        let client = Arc::new(ScriptedClient::new(vec![ScriptedClient::text("{}")]));
        let chain = ExecutorChain::new(
            client.clone(),
            Arc::new(TemplateStore::new()),
            vec![Arc::new(StubSearch)],
            false,
        );

        chain.generate(&json!({"request": "slugify text"})).await.unwrap();

        let requests = client.requests.lock().unwrap();
        let prompt = requests[0][0].get_text().unwrap();
        assert!(prompt.contains("- npm-search: Search npm packages"));
        assert!(prompt.contains("slugify text"));
    }
}
