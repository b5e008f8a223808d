use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

pub const DEFAULT_PROMPT_FILES: &[&str] = &[
    "c1_escrita_formal.txt",
    "c2_tema.txt",
    "c3_argumentacao.txt",
    "c4_coesao.txt",
    "c5_intervencao.txt",
];

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is malformed. The API key is read
/// separately through `require_api_key`, after the input paths are checked.
#[derive(Debug, Clone)]
pub struct Config {
    pub grading: GradingConfig,
    pub llm: LlmConfig,
    pub rust_log: String,
}

/// Everything the grading pipeline needs besides the model itself.
#[derive(Debug, Clone)]
pub struct GradingConfig {
    pub prompts_dir: PathBuf,
    /// Criterion prompt filenames, in scoring order. Each is `<code>_<description>.txt`.
    pub prompt_files: Vec<String>,
    pub essays_dir: PathBuf,
    pub essay_extension: String,
    pub rubric_path: PathBuf,
    pub output_path: PathBuf,
    /// Score recorded when the model reply is not a number.
    pub fallback_score: f64,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            grading: GradingConfig {
                prompts_dir: env_or("GRADER_PROMPTS_DIR", "prompts/system").into(),
                prompt_files: prompt_files_from(std::env::var("GRADER_PROMPT_FILES").ok())
                    .context("GRADER_PROMPT_FILES must name at least one prompt file")?,
                essays_dir: env_or("GRADER_ESSAYS_DIR", "redacoes").into(),
                essay_extension: "txt".to_string(),
                rubric_path: env_or("GRADER_RUBRIC_PATH", "rubrica.json").into(),
                output_path: env_or("GRADER_OUTPUT_PATH", "resultados.json").into(),
                fallback_score: parse_fallback_score(&env_or("GRADER_FALLBACK_SCORE", "0.0"))
                    .context("GRADER_FALLBACK_SCORE must be a finite number")?,
            },
            llm: LlmConfig {
                base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                model: env_or("GRADER_MODEL", "gpt-4o-mini"),
                temperature: env_or("GRADER_TEMPERATURE", "0.0")
                    .parse::<f64>()
                    .context("GRADER_TEMPERATURE must be a number")?,
                request_timeout_secs: env_or("GRADER_REQUEST_TIMEOUT_SECS", "120")
                    .parse::<u64>()
                    .context("GRADER_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            },
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

impl GradingConfig {
    /// Paths that must exist before any essay is processed.
    pub fn required_inputs(&self) -> [(&'static str, &PathBuf); 3] {
        [
            ("diretório de prompts", &self.prompts_dir),
            ("diretório de redações", &self.essays_dir),
            ("arquivo de rubrica", &self.rubric_path),
        ]
    }
}

/// Reads the provider API key. Call after `Config::from_env` so `.env` is loaded.
pub fn require_api_key() -> Result<String> {
    require_env("OPENAI_API_KEY")
}

pub fn default_prompt_files() -> Vec<String> {
    DEFAULT_PROMPT_FILES.iter().map(|s| s.to_string()).collect()
}

/// Splits a comma-separated file list, dropping blanks.
pub fn parse_prompt_files(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configured prompt list, or the default one when unset. An explicit list
/// with no entries is rejected.
pub fn prompt_files_from(raw: Option<String>) -> Result<Vec<String>> {
    let Some(raw) = raw else {
        return Ok(default_prompt_files());
    };
    let files = parse_prompt_files(&raw);
    ensure!(!files.is_empty(), "no prompt files in {raw:?}");
    Ok(files)
}

pub fn parse_fallback_score(raw: &str) -> Result<f64> {
    let score = raw
        .trim()
        .parse::<f64>()
        .with_context(|| format!("{raw:?} is not a number"))?;
    ensure!(score.is_finite(), "{raw:?} is not finite");
    Ok(score)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
