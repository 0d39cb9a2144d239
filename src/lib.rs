//! Sampark Chat - multilingual customer-support replies
//!
//! This library asks a Gemini model for a formal English answer and, when the
//! user wants another language, passes that answer through Google Translate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use core::{
    client::{ChatModel, GeminiClient},
    config::ChatConfig,
    engine::{SupportEngine, SYSTEM_INSTRUCTION},
    errors::ChatError,
    models::{LanguageCode, Message, Reply, ReplyOutcome, Role, Translation},
    translate::{GoogleTranslator, Translator},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
