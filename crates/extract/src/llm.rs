use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A hosted text-generation model. Every extraction and dialogue call goes
/// through this boundary, so callers can swap in a different provider or a
/// scripted double.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Short provider/model label used in logs.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    label: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434";
    pub const DEFAULT_MODEL: &'static str = "llama3";

    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            label: format!("ollama/{}", model),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            client,
        })
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    fn name(&self) -> &str {
        &self.label
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Ollama")?;

        if !response.status().is_success() {
            anyhow::bail!("Ollama request failed: {}", response.status());
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(ollama_response.response)
    }
}

/// Google Generative Language API (`generateContent`).
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    label: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Serialize)]
struct GeminiTextPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiReplyPart>,
}

#[derive(Deserialize)]
struct GeminiReplyPart {
    text: Option<String>,
}

impl GeminiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    pub const DEFAULT_MODEL: &'static str = "gemini-1.5-flash";

    pub fn new(
        base_url: String,
        model: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            label: format!("gemini/{}", model),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    fn name(&self) -> &str {
        &self.label
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiTextPart { text: prompt }],
            }],
        };

        let response = self.client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        if !response.status().is_success() {
            anyhow::bail!("Gemini request failed: {}", response.status());
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        let candidate = gemini_response
            .candidates
            .into_iter()
            .next()
            .context("Gemini returned no candidates")?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!("Gemini returned an empty candidate");
        }

        Ok(text)
    }
}
