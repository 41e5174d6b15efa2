use anyhow::Result;
use dialogue::FailurePolicy;
use extract::{GeminiClient, LanguageModel, OllamaClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("GEMINI_API_KEY must be set when LLM_PROVIDER=gemini")]
    MissingApiKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub retry: RetryConfig,
    pub failure_policy: FailurePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub max_body_bytes: usize,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Ollama,
    Gemini,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    /// Provider default when unset.
    pub model: Option<String>,
    /// Provider default when unset.
    pub base_url: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_addr: "0.0.0.0:5000".to_string(),
                max_body_bytes: 100 * 1024 * 1024,
                log_format: LogFormat::Text,
            },
            llm: LlmConfig {
                provider: LlmProvider::Ollama,
                model: None,
                base_url: None,
                api_key: None,
                request_timeout_secs: 120,
            },
            retry: RetryConfig {
                max_retries: 1,
                initial_backoff_ms: 500,
                max_backoff_ms: 5000,
            },
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(addr) = get("PODCAST_BIND_ADDR") {
            config.server.bind_addr = addr;
        }
        if let Some(v) = get("PODCAST_MAX_BODY_BYTES") {
            config.server.max_body_bytes = parse_number("PODCAST_MAX_BODY_BYTES", &v)?;
        }
        if let Some(v) = get("PODCAST_LOG_FORMAT") {
            config.server.log_format = match v.trim().to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => return Err(invalid("PODCAST_LOG_FORMAT", &v, "expected text or json")),
            };
        }
        if let Some(v) = get("PODCAST_FAILURE_POLICY") {
            config.failure_policy = match v.trim().to_ascii_lowercase().as_str() {
                "abort" => FailurePolicy::Abort,
                "degrade" => FailurePolicy::Degrade,
                _ => return Err(invalid("PODCAST_FAILURE_POLICY", &v, "expected abort or degrade")),
            };
        }

        if let Some(v) = get("LLM_PROVIDER") {
            config.llm.provider = match v.trim().to_ascii_lowercase().as_str() {
                "ollama" => LlmProvider::Ollama,
                "gemini" => LlmProvider::Gemini,
                _ => return Err(invalid("LLM_PROVIDER", &v, "expected ollama or gemini")),
            };
        }
        config.llm.model = get("LLM_MODEL");
        config.llm.base_url = get("LLM_BASE_URL");
        config.llm.api_key = get("GEMINI_API_KEY");
        if let Some(v) = get("LLM_TIMEOUT_SECS") {
            config.llm.request_timeout_secs = parse_number("LLM_TIMEOUT_SECS", &v)?;
        }

        if let Some(v) = get("LLM_MAX_RETRIES") {
            config.retry.max_retries = parse_number("LLM_MAX_RETRIES", &v)?;
        }
        if let Some(v) = get("LLM_INITIAL_BACKOFF_MS") {
            config.retry.initial_backoff_ms = parse_number("LLM_INITIAL_BACKOFF_MS", &v)?;
        }
        if let Some(v) = get("LLM_MAX_BACKOFF_MS") {
            config.retry.max_backoff_ms = parse_number("LLM_MAX_BACKOFF_MS", &v)?;
        }

        if config.llm.provider == LlmProvider::Gemini && config.llm.api_key.is_none() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(config)
    }
}

impl LlmConfig {
    /// Construct the configured provider client.
    pub fn build_model(&self) -> Result<Arc<dyn LanguageModel>> {
        let timeout = Duration::from_secs(self.request_timeout_secs);

        let base_url = |default: &str| self.base_url.clone().unwrap_or_else(|| default.to_string());
        let model_name = |default: &str| self.model.clone().unwrap_or_else(|| default.to_string());

        let model: Arc<dyn LanguageModel> = match self.provider {
            LlmProvider::Ollama => Arc::new(OllamaClient::new(
                base_url(OllamaClient::DEFAULT_BASE_URL),
                model_name(OllamaClient::DEFAULT_MODEL),
                timeout,
            )?),
            LlmProvider::Gemini => {
                let api_key = self.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
                Arc::new(GeminiClient::new(
                    base_url(GeminiClient::DEFAULT_BASE_URL),
                    model_name(GeminiClient::DEFAULT_MODEL),
                    api_key,
                    timeout,
                )?)
            }
        };

        Ok(model)
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| invalid(var, value, &e.to_string()))
}

fn invalid(var: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
