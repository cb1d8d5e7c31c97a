//! OpenAIApiClient - Direct REST API implementation for OpenAI chat completions.
//!
//! This client calls the OpenAI Chat Completions API directly.
//! Configuration priority: ~/.config/recipebot/secret.json > environment variables

use async_trait::async_trait;
use recipebot_core::RecipeBotError;
use recipebot_core::completion::{CompletionClient, CompletionError};
use recipebot_core::config::{
    DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
    OpenAiConfig,
};
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::config::load_secret_config;

/// Client implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAIApiClient {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
    base_url: String,
    timeout: Duration,
}

impl OpenAIApiClient {
    /// Creates a new client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Loads configuration from ~/.config/recipebot/secret.json or environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/recipebot/secret.json
    /// 2. Environment variables (OPENAI_API_KEY, OPENAI_MODEL_NAME, OPENAI_TEMPERATURE,
    ///    OPENAI_BASE_URL, OPENAI_TIMEOUT_SECS)
    ///
    /// Model name defaults to `gpt-4o-mini` if not specified.
    pub fn try_from_env() -> Result<Self, RecipeBotError> {
        let file_config = match load_secret_config() {
            Ok(secret_config) => secret_config.openai,
            Err(reason) => {
                tracing::debug!("[OpenAI] No usable secret file: {}", reason);
                None
            }
        };

        Self::from_sources(file_config, |key| env::var(key).ok())
    }

    /// Builds a client from an optional secret-file section and an environment lookup.
    pub fn from_sources<F>(file_config: Option<OpenAiConfig>, lookup: F) -> Result<Self, RecipeBotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup("OPENAI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                RecipeBotError::config(format!("OPENAI_TIMEOUT_SECS must be an integer, got '{raw}'"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        if let Some(openai_config) = file_config {
            let client = Self::new(
                openai_config.api_key,
                openai_config
                    .model_name
                    .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
            )
            .with_temperature(openai_config.temperature.unwrap_or(DEFAULT_TEMPERATURE))
            .with_base_url(
                openai_config
                    .base_url
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
            )
            .with_timeout(Duration::from_secs(timeout_secs));
            return Ok(client);
        }

        // Fallback to environment variables
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                RecipeBotError::config(
                    "OpenAI API key is missing. Set OPENAI_API_KEY in the environment or .env file, \
                     or add it to ~/.config/recipebot/secret.json",
                )
            })?;

        let model = lookup("OPENAI_MODEL_NAME").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into());

        let temperature = match lookup("OPENAI_TEMPERATURE") {
            Some(raw) => raw.trim().parse::<f32>().map_err(|_| {
                RecipeBotError::config(format!("OPENAI_TEMPERATURE must be a number, got '{raw}'"))
            })?,
            None => DEFAULT_TEMPERATURE,
        };

        let base_url = lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into());

        Ok(Self::new(api_key, model)
            .with_temperature(temperature)
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(timeout_secs)))
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Points the client at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|err| CompletionError::Request {
                message: format!("OpenAI API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            let error = map_http_error(status, body_text);
            tracing::warn!(
                "[OpenAI] {} (retryable: {}, retry_after: {:?})",
                error,
                error.is_retryable(),
                retry_after
            );
            return Err(error);
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::Parse(err.to_string()))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl CompletionClient for OpenAIApiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        tracing::debug!(
            "[OpenAI] Sending completion request (model: {}, prompt_chars: {})",
            self.model,
            prompt.len()
        );

        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> CompletionError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    CompletionError::Http {
        status: status.as_u16(),
        message,
        is_retryable,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // Only the delta-seconds form is supported
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
