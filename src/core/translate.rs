//! Google Cloud Translation (v2) client

use async_trait::async_trait;
use tracing::debug;

use crate::core::client::build_http_client;
use crate::core::config::ChatConfig;
use crate::core::errors::{ChatError, Result};
use crate::core::models::{LanguageCode, Translation};

/// Anything that can translate text into a target language
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`
    async fn translate(&self, text: &str, target: &LanguageCode) -> Result<Translation>;
}

/// REST client for `translate/v2`
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl GoogleTranslator {
    /// Create a client; a missing key only fails once a translation is requested
    pub fn new(config: &ChatConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config.timeout_ms)?,
            api_key: config.translate_api_key.clone(),
            endpoint: config.translate_endpoint.clone(),
        })
    }

    /// JSON body for one plain-text translation
    pub fn build_request_body(text: &str, target: &LanguageCode) -> serde_json::Value {
        serde_json::json!({
            "q": text,
            "target": target.as_str(),
            "format": "text"
        })
    }

    /// Extract the first translation from a v2 response
    pub fn parse_response(json: &serde_json::Value) -> Result<Translation> {
        let first = json["data"]["translations"]
            .get(0)
            .ok_or_else(|| ChatError::InvalidResponseError {
                message: "No translation in response".to_string(),
            })?;

        let text = first["translatedText"]
            .as_str()
            .ok_or_else(|| ChatError::InvalidResponseError {
                message: "Missing translatedText".to_string(),
            })?
            .to_string();

        Ok(Translation {
            text,
            detected_source_lang: first["detectedSourceLanguage"].as_str().map(|s| s.to_string()),
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &LanguageCode) -> Result<Translation> {
        let api_key = self.api_key.as_deref().ok_or_else(|| ChatError::ConfigError {
            message: "GOOGLE_TRANSLATE_API_KEY is not set".to_string(),
        })?;

        debug!(target_lang = %target, chars = text.len(), "Sending translation request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&Self::build_request_body(text, target))
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

        Self::parse_response(&json)
    }
}
