//! Core data models for a support chat turn

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::errors::ChatError;

/// Longest accepted language code (`zh-Hant-TW` and friends fit comfortably)
const MAX_LANGUAGE_CODE_LEN: usize = 16;

/// Target language for the final reply, e.g. `en`, `hi`, `zh-TW`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse and validate a language code
    pub fn parse(code: &str) -> Result<Self, ChatError> {
        let code = code.trim();
        let valid = !code.is_empty()
            && code.len() <= MAX_LANGUAGE_CODE_LEN
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(Self(code.to_string()))
        } else {
            Err(ChatError::InvalidLanguage {
                code: code.to_string(),
            })
        }
    }

    /// English code
    pub fn english() -> Self {
        Self("en".to_string())
    }

    /// Whether replies in this language skip translation
    pub fn is_english(&self) -> bool {
        self.0.eq_ignore_ascii_case("en")
    }

    /// Code as given
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased label used in transcripts
    pub fn label(&self) -> String {
        self.0.to_uppercase()
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = ChatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Role and tone directive
    System,
    /// End-user input
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
        }
    }
}

/// Chat message sent to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Author of the message
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// System instruction message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Translation service output
#[derive(Debug, Clone)]
pub struct Translation {
    /// Translated text
    pub text: String,
    /// Source language reported by the service, if any
    pub detected_source_lang: Option<String>,
}

/// How a chat turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// English requested, model output returned as-is
    English,
    /// Model output translated into the target language
    Translated,
    /// Translation failed, model output returned as-is
    TranslationFallback,
    /// Model call failed, reply carries the error text
    ModelError,
}

/// Result of one chat turn
#[derive(Debug, Clone)]
pub struct Reply {
    /// Text to show the user
    pub text: String,
    /// Raw model output, absent when the model call failed
    pub english: Option<String>,
    /// Requested target language
    pub language: LanguageCode,
    /// How the turn ended
    pub outcome: ReplyOutcome,
}

impl Reply {
    /// Whether `text` is in the target language rather than English
    pub fn is_translated(&self) -> bool {
        self.outcome == ReplyOutcome::Translated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_parse() {
        assert_eq!(LanguageCode::parse("hi").unwrap().as_str(), "hi");
        assert_eq!(LanguageCode::parse(" zh-TW ").unwrap().as_str(), "zh-TW");
        assert!(LanguageCode::parse("").is_err());
        assert!(LanguageCode::parse("   ").is_err());
        assert!(LanguageCode::parse("en us").is_err());
        assert!(LanguageCode::parse("a-very-long-language-tag").is_err());
    }

    #[test]
    fn test_is_english_ignores_case() {
        assert!(LanguageCode::parse("en").unwrap().is_english());
        assert!(LanguageCode::parse("EN").unwrap().is_english());
        assert!(!LanguageCode::parse("en-US").unwrap().is_english());
        assert!(!LanguageCode::parse("es").unwrap().is_english());
    }

    #[test]
    fn test_label_is_uppercase() {
        assert_eq!(LanguageCode::parse("hi").unwrap().label(), "HI");
    }

    #[test]
    fn test_language_code_serde() {
        let code: LanguageCode = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(code.as_str(), "es");
        assert!(serde_json::from_str::<LanguageCode>("\"\"").is_err());
    }
}
