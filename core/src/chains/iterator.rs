//! Tool-revision chain

use crate::chains::agent::run_agent_loop;
use crate::error::Result;
use crate::llm::LlmClient;
use crate::templates::TemplateStore;
use crate::tool::IterationInput;
use crate::tools::LookupTool;
use std::sync::Arc;

/// Same agent wiring as the executor chain, but the instruction asks the
/// model to revise a previously generated tool using its run logs.
pub struct IteratorChain {
    llm: Arc<dyn LlmClient>,
    templates: Arc<TemplateStore>,
    tools: Vec<Arc<dyn LookupTool>>,
    log_to_console: bool,
}

impl IteratorChain {
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

    /// Revise a prior tool given execution logs, returning the raw text
    /// response.
    pub async fn iterate(&self, input: &IterationInput) -> Result<String> {
        let instruction = self.templates.render_iterate(&input.tool, &input.logs)?;
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
    use serde_json::json;

    #[tokio::test]
    async fn test_prompt_embeds_prior_tool_and_logs() {
        let client = Arc::new(ScriptedClient::new(vec![ScriptedClient::text("{}")]));
        let chain = IteratorChain::new(
            client.clone(),
            Arc::new(TemplateStore::new()),
            Vec::new(),
            false,
        );

        let input = IterationInput {
            tool: json!({"name": "Adder", "code": "async function run(i) { return i.a + i.b; }"}),
            logs: "test failed: expected 3 got 4".to_string(),
        };
        chain.iterate(&input).await.unwrap();

        let requests = client.requests.lock().unwrap();
        let prompt = requests[0][0].get_text().unwrap();
        assert!(prompt.contains("\"name\": \"Adder\""));
        assert!(prompt.contains("test failed: expected 3 got 4"));
    }
}
