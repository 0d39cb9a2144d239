//! Gemini model client

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::ChatConfig;
use crate::core::errors::{ChatError, Result};
use crate::core::models::{Message, Role};

/// Anything that turns a message list into a text completion
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the messages and return the model's text
    async fn invoke(&self, messages: &[Message]) -> Result<String>;

    /// Model identifier, for logs
    fn model_id(&self) -> &str;
}

/// Build an HTTP client honouring the optional request timeout
pub(crate) fn build_http_client(timeout_ms: Option<u64>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .pool_max_idle_per_host(10);

    if let Some(ms) = timeout_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }

    Ok(builder.build()?)
}

/// Client for the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    /// Create a new client with the configured model parameters
    pub fn new(config: &ChatConfig) -> Result<Self> {
        config.validate()?;

        let client = build_http_client(config.timeout_ms)?;
        info!(model = %config.model, temperature = config.temperature, "Initialized Gemini model");

        Ok(Self {
            client,
            api_key: config.gemini_api_key.clone(),
            endpoint: config.gemini_endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// Full URL for `generateContent`
    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Request body: system messages become `systemInstruction`, the rest `contents`
    pub fn build_request_body(&self, messages: &[Message]) -> serde_json::Value {
        let system_parts: Vec<serde_json::Value> = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| serde_json::json!({ "text": m.content }))
            .collect();

        let contents: Vec<serde_json::Value> = messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| {
                serde_json::json!({
                    "role": "user",
                    "parts": [{ "text": m.content }]
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "temperature": self.temperature
            }
        });

        if !system_parts.is_empty() {
            body["systemInstruction"] = serde_json::json!({ "parts": system_parts });
        }

        body
    }

    /// Pull the text out of a `generateContent` response
    pub fn parse_response(json: &serde_json::Value) -> Result<String> {
        let parts = json["candidates"]
            .get(0)
            .and_then(|c| c["content"]["parts"].as_array())
            .ok_or_else(|| {
                let reason = json["promptFeedback"]["blockReason"]
                    .as_str()
                    .map(|r| format!("prompt blocked: {r}"))
                    .unwrap_or_else(|| "No candidates in response".to_string());
                ChatError::InvalidResponseError { message: reason }
            })?;

        let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();

        if text.trim().is_empty() {
            return Err(ChatError::InvalidResponseError {
                message: "Empty text in response".to_string(),
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn invoke(&self, messages: &[Message]) -> Result<String> {
        let body = self.build_request_body(messages);
        debug!(model = %self.model, messages = messages.len(), "Sending generateContent request");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(ChatError::from_transport)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChatError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let json: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| ChatError::InvalidResponseError {
                    message: e.without_url().to_string(),
                })?;

        if let Some(tokens) = json["usageMetadata"]["totalTokenCount"].as_u64() {
            debug!(tokens, "Gemini token usage");
        }

        Self::parse_response(&json)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
