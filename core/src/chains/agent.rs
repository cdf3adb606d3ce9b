//! Reasoning/acting loop over the lookup tools
//!
//! The model alternates between text generation and lookup-tool calls until
//! it emits a final text answer. Lookup results are appended to the
//! transcript as tool messages; the next iteration lets the model observe
//! them. Transport failures propagate unmodified; lookup-tool failures
//! arrive as `"Error: …"` strings inside the transcript instead.

use crate::error::{ChainError, Result};
use crate::llm::{ChatOptions, ContentBlock, LlmClient, LlmMessage, MessageContent, MessageRole};
use crate::tools::{definition_for, query_from_input, LookupTool};
use std::sync::Arc;

/// Upper bound on model round-trips in one agent run.
const MAX_AGENT_STEPS: usize = 12;

/// Drive the agent loop from an initial prompt to a final text answer.
///
/// `output_field` names the contractual output slot for error reporting;
/// a run that ends on an empty answer fails with that field name and the
/// observed response.
pub async fn run_agent_loop(
    llm: &dyn LlmClient,
    tools: &[Arc<dyn LookupTool>],
    prompt: String,
    output_field: &str,
    log_to_console: bool,
) -> Result<String> {
    let definitions: Vec<_> = tools.iter().map(|t| definition_for(t.as_ref())).collect();
    let mut messages = vec![LlmMessage::user(prompt)];

    for step in 1..=MAX_AGENT_STEPS {
        if log_to_console {
            tracing::debug!(step, "agent loop: invoking model");
        }

        let response = llm
            .chat_completion(messages.clone(), Some(definitions.clone()), Some(ChatOptions::default()))
            .await?;

        if log_to_console {
            if let Some(usage) = &response.usage {
                tracing::debug!(step, tokens = usage.total_tokens, "agent loop: model responded");
            }
        }

        if response.message.has_tool_use() {
            let mut result_blocks = Vec::new();

            for tool_use in response.message.get_tool_uses() {
                if let ContentBlock::ToolUse { id, name, input } = tool_use {
                    let query = query_from_input(input);
                    let result = match tools.iter().find(|t| t.name() == *name) {
                        Some(tool) => tool.call(&query).await,
                        None => format!("Error: unknown action '{}'", name),
                    };

                    if log_to_console {
                        tracing::debug!(step, tool = %name, "agent loop: action observed");
                    }

                    result_blocks.push(ContentBlock::ToolResult {
                        tool_use_id: id.clone(),
                        content: result,
                    });
                }
            }

            messages.push(response.message);
            messages.push(LlmMessage {
                role: MessageRole::Tool,
                content: MessageContent::Blocks(result_blocks),
            });
            continue;
        }

        let text = response.message.get_text().unwrap_or_default();
        if text.trim().is_empty() {
            return Err(ChainError::MissingOutputField {
                field: output_field.to_string(),
                received: format!("{:?}", response.message),
            }
            .into());
        }
        return Ok(text);
    }

    Err(ChainError::StepsExhausted {
        max_steps: MAX_AGENT_STEPS,
    }
    .into())
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedClient;
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingTool {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingTool {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LookupTool for RecordingTool {
        fn name(&self) -> &str {
            "npm-search"
        }

        fn description(&self) -> &str {
            "Search npm"
        }

        async fn call(&self, query: &str) -> String {
            self.calls.lock().unwrap().push(query.to_string());
            r#"[{"name":"csv-parse","description":"CSV","score":0.9}]"#.to_string()
        }
    }

    #[tokio::test]
    async fn test_loop_calls_tool_then_returns_final_answer() {
        let client = ScriptedClient::new(vec![
            ScriptedClient::tool_call("1", "npm-search", "csv parser"),
            ScriptedClient::text(r#"{"name":"CSV Parser"}"#),
        ]);
        let tool = RecordingTool::new();
        let tools: Vec<Arc<dyn LookupTool>> = vec![tool.clone()];

        let output = run_agent_loop(&client, &tools, "prompt".to_string(), "output", false)
            .await
            .unwrap();

        assert_eq!(output, r#"{"name":"CSV Parser"}"#);
        assert_eq!(tool.calls.lock().unwrap().as_slice(), ["csv parser"]);

        // The second request must carry the observed tool result.
        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        let transcript = serde_json::to_string(&requests[1]).unwrap();
        assert!(transcript.contains("csv-parse"));
    }

    #[tokio::test]
    async fn test_unknown_action_is_reported_in_transcript() {
        let client = ScriptedClient::new(vec![
            ScriptedClient::tool_call("1", "no-such-tool", "x"),
            ScriptedClient::text("done"),
        ]);
        let tools: Vec<Arc<dyn LookupTool>> = Vec::new();

        let output = run_agent_loop(&client, &tools, "prompt".to_string(), "output", false)
            .await
            .unwrap();
        assert_eq!(output, "done");

        let requests = client.requests.lock().unwrap();
        let transcript = serde_json::to_string(&requests[1]).unwrap();
        assert!(transcript.contains("Error: unknown action 'no-such-tool'"));
    }

    #[tokio::test]
    async fn test_empty_final_answer_names_missing_field() {
        let client = ScriptedClient::new(vec![ScriptedClient::text("")]);
        let tools: Vec<Arc<dyn LookupTool>> = Vec::new();

        let err = run_agent_loop(&client, &tools, "prompt".to_string(), "output", false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("'output'"));
    }
}
