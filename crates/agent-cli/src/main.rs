//! Command-line interface for mcp-agent-rs

use agent_cli::{AppSettings, DEFAULT_PROMPT, answer, log_format};
use agent_runtime::AgentType;
use agent_utils::Config;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mcp-agent")]
#[command(about = "Answer a request with an LLM agent backed by MCP tool servers", long_about = None)]
struct Args {
    /// Request for the agent
    #[arg(default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Chat model to use
    #[arg(long, default_value = "gpt-4o-mini")]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_API_BASE")]
    api_base: Option<String>,

    /// Agent strategy: zero-shot-react-description or tool-calling
    #[arg(long, default_value_t = AgentType::ZeroShotReactDescription)]
    agent_type: AgentType,

    /// Maximum reasoning steps before giving up
    #[arg(long, default_value_t = 15)]
    max_iterations: usize,

    /// JSON file listing the MCP servers to use as tools
    #[arg(long)]
    mcp_config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Only log reasoning steps at debug level
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    /// Flags win over values read from the environment
    fn settings(&self, env: &Config) -> AppSettings {
        let defaults = AppSettings::from_config(env);
        AppSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            api_key: self.api_key.clone().or(defaults.api_key),
            api_base: self.api_base.clone().or(defaults.api_base),
            agent_type: self.agent_type,
            max_iterations: self.max_iterations,
            verbose: !self.quiet,
            mcp_config: self.mcp_config.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let env = Config::from_env();

    agent_utils::init_tracing_with(log_format(args.log_json, &env), "info");
    info!(environment = %env.environment, "Starting mcp-agent");

    let result = answer(&args.settings(&env), &args.prompt).await;
    println!("{}", result.to_output(args.json)?);

    Ok(result.exit_code())
}
