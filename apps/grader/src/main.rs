mod config;
mod errors;
mod grading;
mod llm_client;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{require_api_key, Config, LlmConfig};
use crate::grading::pipeline;
use crate::grading::scorer::Scorer;
use crate::llm_client::OpenAiClient;

/// Scores essays against the rubric criteria with a language model.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Grade one essay with all criteria combined into a single prompt and print the score.
    Single {
        /// Path to the essay text file.
        essay: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting grader v{}", env!("CARGO_PKG_VERSION"));

    execute(cli.command, &config, require_api_key).await
}

/// Validates the inputs for `command` before the API key is read, so a
/// missing file is reported ahead of a missing key.
async fn execute(
    command: Option<Command>,
    config: &Config,
    api_key: impl FnOnce() -> Result<String>,
) -> Result<()> {
    match command {
        None => {
            let inputs = pipeline::load_inputs(&config.grading)?;
            let scorer = build_scorer(&config.llm, api_key()?)?;
            let results = pipeline::run(&config.grading, &inputs, &scorer).await?;
            if let Some(last) = results.last() {
                println!("{}", serde_json::to_string_pretty(last)?);
            }
        }
        Some(Command::Single { essay }) => {
            let input = pipeline::load_single(&config.grading, &essay)?;
            let scorer = build_scorer(&config.llm, api_key()?)?;
            let score = pipeline::grade_single(&input, &scorer).await?;
            println!("{score}");
        }
    }

    Ok(())
}

fn build_scorer(config: &LlmConfig, api_key: String) -> Result<Scorer> {
    let llm = OpenAiClient::new(config, api_key)?;
    info!("LLM client initialized (model: {})", llm.model());
    Ok(Scorer::new(Arc::new(llm)))
}
