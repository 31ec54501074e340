//! Multi-tool agent wiring and request handling for the `mcp-agent` binary
//!
//! `create_multi_tool_agent` connects the configured MCP servers, adapts
//! them into tools and builds an agent over an OpenAI-compatible provider.
//! `handle_request` runs that agent on one input and folds the outcome into
//! a `RequestResult` envelope.

use agent_core::{Agent, Context};
use agent_llm::LLMProvider;
use agent_llm::providers::{OpenAIConfig, OpenAIProvider};
use agent_mcp::MCPConfig;
use agent_runtime::{AgentType, ExecutorConfig, initialize_agent};
use agent_utils::{Config, LogFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

/// Prompt answered when none is given
pub const DEFAULT_PROMPT: &str = "Create a short story about the philosopher Spinoza, with an accompanying image, and include some relevant/recent facts.";

/// Outcome of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Success,
    Error,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

/// Result envelope for one request
///
/// Only `success` and `failure` build one, so exactly one of `response` and
/// `error` is set, matching `status`. Serializes with all three keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestResult {
    status: RequestStatus,
    response: Option<String>,
    error: Option<String>,
}

impl RequestResult {
    /// A successful result carrying the agent's answer
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            status: RequestStatus::Success,
            response: Some(response.into()),
            error: None,
        }
    }

    /// A failed result carrying the error description
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: RequestStatus::Error,
            response: None,
            error: Some(error.into()),
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// The agent's answer, on success
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// The error description, on failure
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.status == RequestStatus::Success
    }

    /// Two-line rendering: `Status: ...` then `Response: ...` or `Error: ...`
    pub fn render(&self) -> String {
        let body = match self.status {
            RequestStatus::Success => format!("Response: {}", self.response().unwrap_or_default()),
            RequestStatus::Error => format!("Error: {}", self.error().unwrap_or_default()),
        };
        format!("Status: {}\n{body}", self.status)
    }

    /// Text printed on stdout: pretty JSON envelope or the two-line form
    pub fn to_output(&self, json: bool) -> serde_json::Result<String> {
        if json {
            serde_json::to_string_pretty(self)
        } else {
            Ok(self.render())
        }
    }

    /// Process exit code: failure whenever the status is `error`
    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Log line format: JSON when asked for or in production
pub fn log_format(log_json: bool, env: &Config) -> LogFormat {
    if log_json || env.is_production() {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    }
}

/// Settings used to build the multi-tool agent
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub model: String,
    pub temperature: f32,
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub agent_type: AgentType,
    pub max_iterations: usize,
    /// Log every thought, tool call and observation at info level
    pub verbose: bool,
    /// JSON file listing MCP servers; the built-in three when unset
    pub mcp_config: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        let executor = ExecutorConfig::default();
        Self {
            model: executor.model,
            temperature: executor.temperature.unwrap_or(0.7),
            api_key: None,
            api_base: None,
            agent_type: AgentType::default(),
            max_iterations: executor.max_iterations,
            verbose: true,
            mcp_config: None,
        }
    }
}

impl AppSettings {
    /// Settings with the API key and base taken from the environment
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
            ..Self::default()
        }
    }

    /// Executor configuration for the agent loop
    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            model: self.model.clone(),
            temperature: Some(self.temperature),
            max_iterations: self.max_iterations,
            verbose: self.verbose,
            ..ExecutorConfig::default()
        }
    }

    /// MCP servers to adapt into tools
    pub fn load_mcp_config(&self) -> agent_core::Result<MCPConfig> {
        match &self.mcp_config {
            Some(path) => Ok(MCPConfig::from_file(path)?),
            None => Ok(MCPConfig::default()),
        }
    }

    /// Provider credentials as an application `Config`
    pub fn provider_config(&self) -> Config {
        Config {
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            ..Config::default()
        }
    }

    fn provider(&self) -> agent_core::Result<Arc<dyn LLMProvider>> {
        let credentials = self.provider_config();
        let api_key = credentials
            .require_api_key()
            .map_err(|e| agent_core::Error::ConfigError(e.to_string()))?;

        let mut config = OpenAIConfig::new(api_key);
        if let Some(base) = &credentials.api_base {
            config = config.with_api_base(base.clone());
        }
        let provider = OpenAIProvider::with_config(config)
            .map_err(|e| agent_core::Error::InitializationFailed(e.to_string()))?;
        Ok(Arc::new(provider))
    }
}

/// Build the agent over the configured MCP tools and the OpenAI provider
///
/// A missing API key is a `ConfigError`.
pub fn create_multi_tool_agent(settings: &AppSettings) -> agent_core::Result<Box<dyn Agent>> {
    let provider = settings.provider()?;
    create_agent_with_provider(settings, provider)
}

/// Build the agent over the configured MCP tools and any provider
pub fn create_agent_with_provider(
    settings: &AppSettings,
    provider: Arc<dyn LLMProvider>,
) -> agent_core::Result<Box<dyn Agent>> {
    let tools = settings.load_mcp_config()?.build_tools()?;
    info!(
        agent_type = %settings.agent_type,
        model = %settings.model,
        provider = provider.name(),
        "Building multi-tool agent"
    );
    initialize_agent(tools, provider, settings.agent_type, settings.executor_config())
}

/// Run the agent on `input` and report the outcome
///
/// Never fails: agent errors become a `failure` envelope.
pub async fn handle_request(agent: &dyn Agent, input: &str) -> RequestResult {
    let mut context = Context::new();
    match agent.process(input.to_string(), &mut context).await {
        Ok(response) => {
            info!(
                iterations = context.iterations().unwrap_or_default(),
                tool_calls = context.steps().len(),
                "Request completed"
            );
            RequestResult::success(response)
        }
        Err(e) => {
            error!(error = %e, "Request failed");
            RequestResult::failure(e.to_string())
        }
    }
}

/// Build the OpenAI-backed agent and answer `input`
///
/// Construction failures are reported in the envelope like agent errors.
pub async fn answer(settings: &AppSettings, input: &str) -> RequestResult {
    match create_multi_tool_agent(settings) {
        Ok(agent) => handle_request(agent.as_ref(), input).await,
        Err(e) => {
            error!(error = %e, "Agent construction failed");
            RequestResult::failure(e.to_string())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use agent_llm::{CompletionRequest, CompletionResponse, LLMError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::io::Write;
    use std::sync::Mutex;

    struct ScriptedProvider {
        replies: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(replies: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().map(|r| (*r).to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> agent_llm::Result<CompletionResponse> {
            self.prompts.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .map(CompletionResponse::text)
                .ok_or_else(|| LLMError::RequestFailed("connection refused".into()))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn test_result_envelope() {
        let ok = RequestResult::success("a story");
        assert!(ok.is_success());
        assert_eq!(ok.render(), "Status: success\nResponse: a story");
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({"status": "success", "response": "a story", "error": null})
        );

        let err = RequestResult::failure("boom");
        assert!(!err.is_success());
        assert_eq!(err.response(), None);
        assert_eq!(err.error(), Some("boom"));
        assert_eq!(err.render(), "Status: error\nError: boom");
        assert_eq!(serde_json::to_value(&err).unwrap()["status"], "error");
    }

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.agent_type, AgentType::ZeroShotReactDescription);
        let config = settings.executor_config();
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.max_iterations, 15);
    }

    #[test]
    fn test_default_agent_logs_every_step() {
        let settings = AppSettings::default();
        assert!(settings.verbose);
        assert!(settings.executor_config().verbose);
        assert!(AppSettings::from_config(&Config::default()).executor_config().verbose);
    }

    #[test]
    fn test_output_formats() {
        let ok = RequestResult::success("a story");
        assert_eq!(ok.to_output(false).unwrap(), "Status: success\nResponse: a story");

        let json: serde_json::Value =
            serde_json::from_str(&RequestResult::failure("boom").to_output(true).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "response": null, "error": "boom"})
        );
    }

    #[test]
    fn test_exit_code_follows_status() {
        assert_eq!(RequestResult::success("ok").exit_code(), ExitCode::SUCCESS);
        assert_eq!(RequestResult::failure("no").exit_code(), ExitCode::FAILURE);
    }

    #[test]
    fn test_log_format() {
        let production = Config {
            environment: "production".into(),
            ..Config::default()
        };
        assert_eq!(log_format(false, &Config::default()), LogFormat::Pretty);
        assert_eq!(log_format(true, &Config::default()), LogFormat::Json);
        assert_eq!(log_format(false, &production), LogFormat::Json);
    }

    #[tokio::test]
    async fn test_construction_failure_is_error_envelope() {
        let settings = AppSettings {
            api_key: Some("   ".into()),
            ..AppSettings::default()
        };
        let result = answer(&settings, DEFAULT_PROMPT).await;

        assert_eq!(result.status(), RequestStatus::Error);
        assert_eq!(
            result.render(),
            "Status: error\nError: Configuration error: OPENAI_API_KEY is not set"
        );
        assert_eq!(result.exit_code(), ExitCode::FAILURE);
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let result = create_multi_tool_agent(&AppSettings::default());
        assert!(matches!(
            result,
            Err(agent_core::Error::ConfigError(msg)) if msg == "OPENAI_API_KEY is not set"
        ));
    }

    #[test]
    fn test_openai_agent_builds_with_key() {
        let settings = AppSettings {
            api_key: Some("sk-test".into()),
            api_base: Some("http://localhost:8000/v1".into()),
            ..AppSettings::default()
        };
        let agent = create_multi_tool_agent(&settings).unwrap();
        assert_eq!(agent.name(), "zero-shot-react-description");
    }

    #[tokio::test]
    async fn test_end_to_end_with_three_tools() {
        let provider = ScriptedProvider::new(&[
            " I need facts.\nAction: WebSearch\nAction Input: Spinoza recent news",
            " Now a story.\nAction: StoryWriter\nAction Input: \"Spinoza\"",
            " Now the image.\nAction: ImageGenerator\nAction Input: Spinoza portrait",
            " I now know the final answer\nFinal Answer: Here is the story, image and facts.",
        ]);
        let agent = create_agent_with_provider(&AppSettings::default(), provider.clone()).unwrap();

        let result = handle_request(agent.as_ref(), DEFAULT_PROMPT).await;
        assert_eq!(
            result,
            RequestResult::success("Here is the story, image and facts.")
        );

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 4);
        let first = prompts[0].messages[0].text().unwrap();
        assert!(first.contains(
            "WebSearch: Search the web for information and recent facts\n\
             StoryWriter: Write creative stories on any topic\n\
             ImageGenerator: Create images based on descriptions"
        ));
        let last = prompts[3].messages[0].text().unwrap();
        assert!(last.contains(
            "Observation: Response from story_writer_server for query: Spinoza\n"
        ));
    }

    #[tokio::test]
    async fn test_agent_failure_becomes_error_envelope() {
        let provider = ScriptedProvider::new(&[]);
        let agent = create_agent_with_provider(&AppSettings::default(), provider).unwrap();

        let result = handle_request(agent.as_ref(), "hi").await;
        assert_eq!(result.status(), RequestStatus::Error);
        assert!(result.error().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_custom_mcp_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"servers": [{{"server": "calendar_server"}}]}}"#).unwrap();

        let provider = ScriptedProvider::new(&[
            "Action: calendar_server\nAction Input: today",
            "Final Answer: nothing scheduled",
        ]);
        let settings = AppSettings {
            mcp_config: Some(file.path().to_path_buf()),
            ..AppSettings::default()
        };
        let agent = create_agent_with_provider(&settings, provider.clone()).unwrap();

        let result = handle_request(agent.as_ref(), "What is on today?").await;
        assert_eq!(result.response(), Some("nothing scheduled"));
        let first = provider.prompts.lock().unwrap()[0].messages[0]
            .text()
            .unwrap()
            .to_string();
        assert!(first.contains("calendar_server: Use this tool to access calendar_server functionality"));
    }

    #[test]
    fn test_bad_mcp_config_path() {
        let settings = AppSettings {
            mcp_config: Some(PathBuf::from("/nonexistent/servers.json")),
            ..AppSettings::default()
        };
        let err = create_agent_with_provider(&settings, ScriptedProvider::new(&[]))
            .err()
            .unwrap();
        assert!(matches!(err, agent_core::Error::ConfigError(_)));
    }
}
