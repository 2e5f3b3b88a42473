//! Chat-completions client for the OpenAI API.

use std::time::Duration;

use reelpulse_core::OpenAiSettings;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::backend::{CompletionBackend, CompletionRequest};
use crate::error::ScriptGenError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/";
const DEFAULT_MODEL: &str = "gpt-4o";
const CHAT_COMPLETIONS_PATH: &str = "v1/chat/completions";

/// [`CompletionBackend`] backed by `POST /v1/chat/completions`.
///
/// Use [`OpenAiClient::from_settings`] in the binaries, or
/// [`OpenAiClient::with_base_url`] to point at a mock server in tests.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Creates a client for the production API with the default model.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptGenError::MissingApiKey`] if `api_key` is blank, or
    /// [`ScriptGenError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ScriptGenError> {
        Self::with_base_url(api_key, DEFAULT_MODEL, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Builds a client from loaded configuration. This is the point where a
    /// missing key becomes an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptGenError::MissingApiKey`] if no key is configured,
    /// otherwise as [`OpenAiClient::with_base_url`].
    pub fn from_settings(settings: &OpenAiSettings) -> Result<Self, ScriptGenError> {
        let api_key = settings
            .api_key
            .as_deref()
            .ok_or(ScriptGenError::MissingApiKey)?;
        Self::with_base_url(api_key, &settings.model, settings.timeout_secs, &settings.base_url)
    }

    /// Creates a client with a custom base URL and model.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptGenError::MissingApiKey`] if `api_key` is blank,
    /// [`ScriptGenError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`ScriptGenError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ScriptGenError> {
        if api_key.trim().is_empty() {
            return Err(ScriptGenError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("reelpulse/0.1 (scriptgen)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ScriptGenError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.trim().to_owned(),
            model: model.to_owned(),
            base_url,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, request: &CompletionRequest) -> Result<String, ScriptGenError> {
        let url = self
            .base_url
            .join(CHAT_COMPLETIONS_PATH)
            .map_err(|e| ScriptGenError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ScriptGenError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ScriptGenError::Deserialize {
                context: "chat completion".to_string(),
                source: e,
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ScriptGenError::EmptyCompletion)
    }
}

impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ScriptGenError> {
        tracing::debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            "sending chat completion"
        );
        self.chat(&request).await
    }
}
