use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
    pub busy_timeout_ms: u64,
    pub journal_mode: String,
    pub synchronous: String,
}

impl DatabaseConfig {
    /// Local or remote database at `url` with default pragmas.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: None,
            local_path: None,
            busy_timeout_ms: 5000,
            journal_mode: "WAL".to_string(),
            synchronous: "NORMAL".to_string(),
        }
    }
}

/// Hosted chat model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Provider-prefixed model, e.g. `openai/gpt-4o-mini` or `azure/<deployment>`.
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// Only used by Azure deployments.
    pub api_version: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Number of most recent turns re-sent to the model.
    pub history_limit: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { history_limit: 10 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown log format: {s}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

pub const DEFAULT_AZURE_API_VERSION: &str = "2024-10-01-preview";

fn llm_config_from_env() -> Option<LlmConfig> {
    let model = match env::var("LLM_MODEL") {
        Ok(model) => model,
        Err(_) => {
            // Plain Azure OpenAI settings are accepted when no model is named.
            let endpoint = env::var("AZURE_OPENAI_ENDPOINT").ok()?;
            let deployment = env::var("AZURE_OPENAI_DEPLOYMENT_NAME")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string());
            return Some(LlmConfig {
                model: format!("azure/{deployment}"),
                api_key: env::var("AZURE_OPENAI_API_KEY").ok(),
                base_url: Some(endpoint),
                api_version: env::var("LLM_API_VERSION")
                    .unwrap_or_else(|_| DEFAULT_AZURE_API_VERSION.to_string()),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 60),
                temperature: parse_env_or("LLM_TEMPERATURE", 0.7),
                max_tokens: parse_env_or("LLM_MAX_TOKENS", 800),
            });
        }
    };

    Some(LlmConfig {
        model,
        api_key: env::var("LLM_API_KEY").ok(),
        base_url: env::var("LLM_BASE_URL").ok(),
        api_version: env::var("LLM_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_AZURE_API_VERSION.to_string()),
        timeout_secs: parse_env_or("LLM_TIMEOUT", 60),
        temperature: parse_env_or("LLM_TEMPERATURE", 0.7),
        max_tokens: parse_env_or("LLM_MAX_TOKENS", 800),
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("COMPANION_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("COMPANION_PORT", 8000),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:companion.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
                busy_timeout_ms: parse_env_or("DATABASE_BUSY_TIMEOUT_MS", 5000),
                journal_mode: env::var("DATABASE_JOURNAL_MODE")
                    .unwrap_or_else(|_| "WAL".to_string()),
                synchronous: env::var("DATABASE_SYNCHRONOUS")
                    .unwrap_or_else(|_| "NORMAL".to_string()),
            },
            chat: ChatConfig {
                history_limit: parse_env_opt("CHAT_HISTORY_LIMIT")
                    .unwrap_or(ChatConfig::default().history_limit),
            },
            logging: LoggingConfig {
                format: parse_env_or("LOG_FORMAT", LogFormat::Pretty),
            },
            llm: llm_config_from_env(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio", "azure"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
