use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::error::{Result, SqlPilotError};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_DB_PATH: &str = "store_database.db";
pub const DEFAULT_AUDIT_LOG: &str = "agent_summary.csv";

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";

/// Ollama ignores the Authorization header but the OpenAI-compatible
/// endpoint still expects one to be present.
const OLLAMA_PLACEHOLDER_KEY: &str = "ollama";

/// Which backend serves the selected model. Gemini models go through
/// Google's OpenAI-compatible endpoint, everything else through Ollama.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    Ollama,
}

impl Provider {
    pub fn for_model(model: &str) -> Self {
        if model.to_lowercase().contains("gemini") {
            Provider::Gemini
        } else {
            Provider::Ollama
        }
    }
}

pub struct Config {
    pub model: String,
    pub provider: Provider,
    pub api_key: String,
    pub api_endpoint: String,
    pub db_path: PathBuf,
    pub audit_log: PathBuf,
    pub system_prompt: Option<String>,
    pub request_timeout: u64,
    pub history_limit: usize,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default)]
    pub audit_log: Option<PathBuf>,
    #[serde(default)]
    pub api_endpoint: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub request_timeout: Option<u64>,
    #[serde(default)]
    pub history_limit: Option<usize>,
    #[serde(default)]
    pub verbose: Option<bool>,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config =
            FileConfig::load().map_err(|e| SqlPilotError::ConfigError(format!("{:#}", e)))?;

        // Model: CLI args > env var > config file > default
        let model = args
            .model
            .clone()
            .or_else(|| env::var("SQLPILOT_MODEL").ok())
            .or(file_config.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let provider = Provider::for_model(&model);

        let endpoint_override = args
            .api_endpoint
            .clone()
            .or_else(|| env::var("SQLPILOT_API_ENDPOINT").ok())
            .or(file_config.api_endpoint.clone());

        // Credentials come from env vars only, never from the config file
        let (api_key, api_endpoint) = match provider {
            Provider::Gemini => {
                let key = env::var("GOOGLE_API_KEY").map_err(|_| {
                    SqlPilotError::ConfigError(format!(
                        "GOOGLE_API_KEY environment variable not set (required for model '{}')",
                        model
                    ))
                })?;
                let endpoint = endpoint_override
                    .map(|e| normalize_endpoint(&e))
                    .unwrap_or_else(|| GEMINI_ENDPOINT.to_string());
                (key, endpoint)
            }
            Provider::Ollama => {
                let host = endpoint_override
                    .or_else(|| env::var("OLLAMA_HOST").ok())
                    .ok_or_else(|| {
                        SqlPilotError::ConfigError(format!(
                            "OLLAMA_HOST environment variable not set (required for model '{}', \
                             e.g. http://localhost:11434)",
                            model
                        ))
                    })?;
                (OLLAMA_PLACEHOLDER_KEY.to_string(), normalize_endpoint(&host))
            }
        };

        // Database path: CLI args > env var > config file > default
        let db_path = args
            .db_path
            .clone()
            .or_else(|| env::var("SQLPILOT_DB_PATH").ok().map(PathBuf::from))
            .or(file_config.db_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        // Audit log path: CLI args > env var > config file > default
        let audit_log = args
            .audit_log
            .clone()
            .or_else(|| env::var("SQLPILOT_AUDIT_LOG").ok().map(PathBuf::from))
            .or(file_config.audit_log.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIT_LOG));

        // System prompt override: env var > config file
        let system_prompt = env::var("SQLPILOT_SYSTEM_PROMPT")
            .ok()
            .or(file_config.system_prompt.clone());

        let request_timeout = env::var("SQLPILOT_REQUEST_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(file_config.request_timeout)
            .unwrap_or(120);

        let history_limit = env::var("SQLPILOT_HISTORY_LIMIT")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .or(file_config.history_limit)
            .unwrap_or(40);

        let env_verbose = env::var("SQLPILOT_VERBOSE")
            .ok()
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"));
        let verbose = args.verbose || env_verbose.or(file_config.verbose).unwrap_or(false);

        Ok(Config {
            model,
            provider,
            api_key,
            api_endpoint,
            db_path,
            audit_log,
            system_prompt,
            request_timeout,
            history_limit,
            verbose,
        })
    }

    pub fn get_current_date() -> String {
        chrono::Local::now().format("%A, %B %d, %Y").to_string()
    }
}

/// Accepts a bare host, a base URL, or a full chat-completions URL and
/// returns the full chat-completions URL.
pub fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.ends_with("/chat/completions") {
        endpoint.to_string()
    } else if endpoint.ends_with("/v1") {
        format!("{}/chat/completions", endpoint)
    } else if endpoint.ends_with("/v1/") {
        format!("{}chat/completions", endpoint)
    } else {
        format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'))
    }
}

impl FileConfig {
    pub fn load() -> anyhow::Result<Self> {
        for path in Self::config_paths() {
            if path.exists() {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                let config = serde_yaml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
                return Ok(config);
            }
        }
        Ok(FileConfig::default())
    }

    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory first, then the user's config directory
        paths.push(PathBuf::from(".sqlpilot.yaml"));
        paths.push(PathBuf::from(".sqlpilot.yml"));

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("sqlpilot");
            paths.push(config_dir.join("sqlpilot.yaml"));
            paths.push(config_dir.join("sqlpilot.yml"));
        }

        paths
    }
}
