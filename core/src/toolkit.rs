//! Toolkit facade
//!
//! Owns the three generation chains and performs response parsing,
//! validation, and formatting. Chains and the lookup-tool list are built
//! once at construction and only read afterwards, so concurrent calls on
//! one `Toolkit` are independent.

use crate::chains::{ExecutorChain, IteratorChain, SimpleChain, DEFAULT_MODEL};
use crate::config::{EnvLookup, ResolvedCredentials, ToolkitConfig};
use crate::error::{ResponseError, Result};
use crate::format::ToolFormatter;
use crate::llm::{LlmClient, OpenAiClient};
use crate::templates::TemplateStore;
use crate::tool::{FormattedTool, GeneratedTool, IterationInput};
use crate::tools::{LookupTool, PackageInfoTool, PackageSearchTool, WebSearchTool};
use serde_json::Value;
use std::sync::Arc;

/// Facade over the generation chains and the response pipeline.
pub struct Toolkit {
    simple: SimpleChain,
    executor: ExecutorChain,
    iterator: IteratorChain,
    formatter: ToolFormatter,
}

impl Toolkit {
    /// Construct a toolkit, resolving credentials from explicit
    /// configuration first and the process environment second. Missing
    /// either credential is a fatal error before any network call.
    pub fn new(config: ToolkitConfig) -> Result<Self> {
        Self::from_credentials(ResolvedCredentials::from_env(config)?)
    }

    /// Construct with an injected environment lookup (testable without
    /// mutating the real process environment).
    pub fn with_env(config: ToolkitConfig, env: &EnvLookup) -> Result<Self> {
        Self::from_credentials(ResolvedCredentials::resolve(config, env)?)
    }

    fn from_credentials(credentials: ResolvedCredentials) -> Result<Self> {
        let llm: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(
            &credentials.openai_api_key,
            DEFAULT_MODEL,
        )?);

        let tools: Vec<Arc<dyn LookupTool>> = vec![
            Arc::new(PackageInfoTool::new()),
            Arc::new(PackageSearchTool::new()),
            Arc::new(WebSearchTool::new(&credentials.serp_api_key)),
        ];

        Ok(Self::with_client(llm, tools, credentials.log_to_console))
    }

    /// Construct from an existing client and lookup-tool set.
    pub fn with_client(
        llm: Arc<dyn LlmClient>,
        tools: Vec<Arc<dyn LookupTool>>,
        log_to_console: bool,
    ) -> Self {
        let templates = Arc::new(TemplateStore::new());

        Self {
            simple: SimpleChain::new(llm.clone(), templates.clone(), log_to_console),
            executor: ExecutorChain::new(
                llm.clone(),
                templates.clone(),
                tools.clone(),
                log_to_console,
            ),
            iterator: IteratorChain::new(llm, templates.clone(), tools, log_to_console),
            formatter: ToolFormatter::new(templates),
        }
    }

    /// Generate a tool from an arbitrary JSON-serializable request.
    ///
    /// NOTE: the flag is inverted relative to its name: `use_executor =
    /// false` selects the executor chain and `true` the single-call chain.
    /// External callers depend on this routing, so it is preserved as-is.
    /// TODO: deprecate the inverted flag in the next breaking release and
    /// replace it with an explicit chain selector enum.
    pub async fn generate_tool(&self, input: &Value, use_executor: bool) -> Result<FormattedTool> {
        let raw = if use_executor {
            self.simple.generate(input).await?
        } else {
            self.executor.generate(input).await?
        };
        self.parse_response(&raw)
    }

    /// Refine a previously generated tool from its run logs.
    pub async fn iterate_tool(&self, input: &IterationInput) -> Result<FormattedTool> {
        let raw = self.iterator.iterate(input).await?;
        self.parse_response(&raw)
    }

    /// Parse, validate, and format a raw model response.
    ///
    /// Any failure aborts the whole call; no partial tool is ever
    /// returned.
    pub fn parse_response(&self, raw: &str) -> Result<FormattedTool> {
        let value: Value =
            serde_json::from_str(raw.trim()).map_err(|_| ResponseError::InvalidJson {
                raw: raw.to_string(),
            })?;

        let violations = validate_tool_shape(&value);
        if !violations.is_empty() {
            return Err(ResponseError::SchemaViolation { violations }.into());
        }

        let tool: GeneratedTool = serde_json::from_value(value)?;
        let base = self.formatter.derive_base(tool);
        self.formatter.format(base)
    }
}

/// Validate the parsed response against the tool shape, enumerating every
/// violation. No coercion, no partial acceptance.
fn validate_tool_shape(value: &Value) -> Vec<String> {
    let mut violations = Vec::new();

    let Some(object) = value.as_object() else {
        return vec!["response is not a JSON object".to_string()];
    };

    for field in ["name", "description", "code"] {
        match object.get(field) {
            None => violations.push(format!("missing required field '{}'", field)),
            Some(v) if !v.is_string() => {
                violations.push(format!("field '{}' must be a string", field))
            }
            Some(_) => {}
        }
    }

    for field in ["inputSchema", "outputSchema"] {
        if let Some(v) = object.get(field) {
            if !v.is_object() {
                violations.push(format!("field '{}' must be a JSON object", field));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::agent::testing::ScriptedClient;
    use serde_json::json;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn toolkit_with_script(responses: Vec<crate::llm::LlmMessage>) -> (Toolkit, Arc<ScriptedClient>) {
        let client = Arc::new(ScriptedClient::new(responses));
        let toolkit = Toolkit::with_client(client.clone(), Vec::new(), false);
        (toolkit, client)
    }

    fn offline_toolkit() -> Toolkit {
        toolkit_with_script(Vec::new()).0
    }

    const VALID_RESPONSE: &str = r#"{"name":"CSV Parser","description":"Parses CSV.","inputSchema":{},"outputSchema":{},"code":"async function run(input) { return input; }"}"#;

    #[test]
    fn test_explicit_keys_construct_without_env() {
        let config = ToolkitConfig::new()
            .with_openai_api_key("k1")
            .with_serp_api_key("k2");
        assert!(Toolkit::with_env(config, &no_env).is_ok());
    }

    #[test]
    fn test_missing_keys_fail_before_any_network_call() {
        assert!(matches!(
            Toolkit::with_env(ToolkitConfig::new(), &no_env),
            Err(crate::error::Error::Config(_))
        ));
    }

    #[test]
    fn test_parse_response_derives_slug() {
        let tool = offline_toolkit().parse_response(VALID_RESPONSE).unwrap();
        assert_eq!(tool.tool.slug, "csv-parser");
        assert_eq!(tool.tool.name(), "CSV Parser");
    }

    #[test]
    fn test_non_json_fails_with_parse_error_carrying_raw_text() {
        let err = offline_toolkit().parse_response("not json").unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Response(ResponseError::InvalidJson { .. })
        ));
        assert!(err.to_string().contains("not json"));
    }

    #[test]
    fn test_missing_fields_enumerated_in_one_violation() {
        let err = offline_toolkit()
            .parse_response(r#"{"description": "only this"}"#)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing required field 'name'"));
        assert!(message.contains("missing required field 'code'"));
        assert!(!message.contains("'description'"));
    }

    #[test]
    fn test_non_object_schema_is_a_violation() {
        let raw = r#"{"name":"X","description":"d","inputSchema":[1,2],"code":"async function run(i) {}"}"#;
        let err = offline_toolkit().parse_response(raw).unwrap_err();
        assert!(err.to_string().contains("'inputSchema' must be a JSON object"));
    }

    #[test]
    fn test_absent_schemas_default_to_empty_objects() {
        let raw = r#"{"name":"X","description":"d","code":"async function run(i) { return i; }"}"#;
        let tool = offline_toolkit().parse_response(raw).unwrap();
        assert_eq!(tool.tool.tool.input_schema, json!({}));
        assert_eq!(tool.tool.tool.output_schema, json!({}));
    }

    #[tokio::test]
    async fn test_generate_tool_default_path_uses_executor_wrapper() {
        let (toolkit, client) =
            toolkit_with_script(vec![ScriptedClient::text(VALID_RESPONSE)]);

        toolkit
            .generate_tool(&json!({"request": "parse csv"}), false)
            .await
            .unwrap();

        let requests = client.requests.lock().unwrap();
        let prompt = requests[0][0].get_text().unwrap();
        assert!(prompt.contains("You are an agent that writes Tools"));
    }

    #[tokio::test]
    async fn test_generate_tool_flag_true_routes_to_simple_chain() {
        let (toolkit, client) =
            toolkit_with_script(vec![ScriptedClient::text(VALID_RESPONSE)]);

        toolkit
            .generate_tool(&json!({"request": "parse csv"}), true)
            .await
            .unwrap();

        let requests = client.requests.lock().unwrap();
        let prompt = requests[0][0].get_text().unwrap();
        assert!(!prompt.contains("You are an agent that writes Tools"));
    }

    #[tokio::test]
    async fn test_generate_tool_rejects_non_json_model_output() {
        let (toolkit, _client) = toolkit_with_script(vec![ScriptedClient::text("not json")]);

        let err = toolkit
            .generate_tool(&json!({"request": "x"}), false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not json"));
    }

    #[tokio::test]
    async fn test_iterate_tool_parses_revised_response() {
        let (toolkit, _client) = toolkit_with_script(vec![ScriptedClient::text(VALID_RESPONSE)]);

        let input = IterationInput {
            tool: json!({"name": "CSV Parser"}),
            logs: "ok".to_string(),
        };
        let tool = toolkit.iterate_tool(&input).await.unwrap();
        assert_eq!(tool.tool.slug, "csv-parser");
    }
}
