//! Configuration management

use std::fmt;
use tracing::{debug, warn};

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Low temperature keeps support answers consistent
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
/// Gemini REST base URL
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Cloud Translation v2 URL
pub const DEFAULT_TRANSLATE_ENDPOINT: &str =
    "https://translation.googleapis.com/language/translate/v2";

/// Required environment variable holding the Gemini key
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Configuration for the support chat
#[derive(Clone)]
pub struct ChatConfig {
    /// Gemini API key, sent as `x-goog-api-key`
    pub gemini_api_key: String,
    /// Gemini REST base URL
    pub gemini_endpoint: String,
    /// Gemini model name
    pub model: String,
    /// Sampling temperature, `0.0..=2.0`
    pub temperature: f32,
    /// Cloud Translation key; translations fail without it
    pub translate_api_key: Option<String>,
    /// Cloud Translation v2 URL
    pub translate_endpoint: String,
    /// No client timeout when unset
    pub timeout_ms: Option<u64>,
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("gemini_endpoint", &self.gemini_endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field(
                "translate_api_key",
                &redact(self.translate_api_key.as_deref().unwrap_or_default()),
            )
            .field("translate_endpoint", &self.translate_endpoint)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            translate_api_key: None,
            translate_endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
            timeout_ms: None,
        }
    }
}

impl ChatConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = non_empty(GEMINI_API_KEY_VAR)
            .ok_or_else(|| anyhow::anyhow!("{GEMINI_API_KEY_VAR} environment variable not set."))?;

        let gemini_endpoint = non_empty("GEMINI_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string());

        let model = non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = match non_empty("GEMINI_TEMPERATURE") {
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .map_err(|e| anyhow::anyhow!("GEMINI_TEMPERATURE is not a number: {e}"))?,
            None => DEFAULT_TEMPERATURE,
        };

        let translate_api_key = non_empty("GOOGLE_TRANSLATE_API_KEY");
        if translate_api_key.is_none() {
            warn!("GOOGLE_TRANSLATE_API_KEY not set; non-English replies will fall back to English");
        }

        let translate_endpoint = non_empty("TRANSLATE_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_TRANSLATE_ENDPOINT.to_string());

        let timeout_ms = non_empty("REQUEST_TIMEOUT_MS")
            .map(|raw| raw.trim().parse::<u64>())
            .transpose()
            .map_err(|e| anyhow::anyhow!("REQUEST_TIMEOUT_MS is not a number: {e}"))?;

        let config = Self {
            gemini_api_key,
            gemini_endpoint,
            model,
            temperature,
            translate_api_key,
            translate_endpoint,
            timeout_ms,
        };
        config.validate()?;

        debug!(model = %config.model, temperature = config.temperature, "Loaded configuration");
        Ok(config)
    }

    /// Load from the environment, letting an explicit key win over `GEMINI_API_KEY`
    pub fn load(api_key: Option<String>) -> anyhow::Result<Self> {
        match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => Self::from_lookup(|name| {
                if name == GEMINI_API_KEY_VAR {
                    Some(key.clone())
                } else {
                    std::env::var(name).ok()
                }
            }),
            None => Self::from_env(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.gemini_api_key.is_empty() {
            return Err(anyhow::anyhow!("{GEMINI_API_KEY_VAR} environment variable not set."));
        }

        if self.gemini_endpoint.is_empty() {
            return Err(anyhow::anyhow!("Gemini endpoint is required"));
        }

        if self.translate_endpoint.is_empty() {
            return Err(anyhow::anyhow!("Translate endpoint is required"));
        }

        if self.model.is_empty() {
            return Err(anyhow::anyhow!("Model name is required"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(anyhow::anyhow!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }

        Ok(())
    }
}
