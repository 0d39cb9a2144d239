//! Support chat engine: ask the model in English, translate the answer if needed

use std::sync::Arc;
use tracing::{info, warn};

use crate::core::client::{ChatModel, GeminiClient};
use crate::core::config::ChatConfig;
use crate::core::errors::Result;
use crate::core::models::{LanguageCode, Message, Reply, ReplyOutcome};
use crate::core::translate::{GoogleTranslator, Translator};

/// Role and tone directive sent ahead of every user prompt
pub const SYSTEM_INSTRUCTION: &str = "You are Sampark-AI, a helpful, polite, and official customer support assistant \
for a government agency. Keep your answers concise, accurate, and professional. \
Always respond in clear, formal English, as your final output will be translated.";

/// Sequences one model call and an optional translation call
#[derive(Clone)]
pub struct SupportEngine {
    model: Arc<dyn ChatModel>,
    translator: Arc<dyn Translator>,
}

impl SupportEngine {
    /// Engine over any model and translator
    pub fn new(model: Arc<dyn ChatModel>, translator: Arc<dyn Translator>) -> Self {
        Self { model, translator }
    }

    /// Gemini + Google Translate from configuration
    pub fn from_config(config: &ChatConfig) -> Result<Self> {
        let model = GeminiClient::new(config)?;
        let translator = GoogleTranslator::new(config)?;
        Ok(Self::new(Arc::new(model), Arc::new(translator)))
    }

    /// System instruction followed by the user's text
    pub fn build_messages(user_prompt: &str) -> Vec<Message> {
        vec![Message::system(SYSTEM_INSTRUCTION), Message::user(user_prompt)]
    }

    /// Run one chat turn.
    ///
    /// Never fails: a model error becomes the reply text, and a translation
    /// error falls back to the English answer.
    pub async fn respond(&self, user_prompt: &str, language: &LanguageCode) -> Reply {
        info!(language = %language, model = self.model.model_id(), "Handling user prompt");

        let messages = Self::build_messages(user_prompt);

        let english = match self.model.invoke(&messages).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Model call failed: {}", e);
                return Reply {
                    text: format!(
                        "AI Error: Could not generate response. Check your GEMINI_API_KEY. Details: {e}"
                    ),
                    english: None,
                    language: language.clone(),
                    outcome: ReplyOutcome::ModelError,
                };
            }
        };

        if language.is_english() {
            return Reply {
                text: english.clone(),
                english: Some(english),
                language: language.clone(),
                outcome: ReplyOutcome::English,
            };
        }

        match self.translator.translate(&english, language).await {
            Ok(translation) => {
                info!(
                    language = %language,
                    detected = translation.detected_source_lang.as_deref().unwrap_or("unknown"),
                    "Translated response"
                );
                Reply {
                    text: translation.text,
                    english: Some(english),
                    language: language.clone(),
                    outcome: ReplyOutcome::Translated,
                }
            }
            Err(e) => {
                warn!("Translation failed ({}). Falling back to English response.", e);
                Reply {
                    text: english.clone(),
                    english: Some(english),
                    language: language.clone(),
                    outcome: ReplyOutcome::TranslationFallback,
                }
            }
        }
    }

    /// Run one chat turn and return only the text for the user
    pub async fn chat(&self, user_prompt: &str, language: &LanguageCode) -> String {
        self.respond(user_prompt, language).await.text
    }
}
