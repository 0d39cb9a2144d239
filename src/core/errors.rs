//! Custom error types for chat and translation calls

use thiserror::Error;

/// Errors raised while talking to the model or translation services
#[derive(Error, Debug)]
pub enum ChatError {
    /// Service answered with a non-success status
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Underlying transport message
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What was wrong with the payload
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the bad or missing setting
        message: String,
    },

    /// Language code that is not a short identifier
    #[error("Invalid language code: '{code}'")]
    InvalidLanguage {
        /// The rejected input
        code: String,
    },

    /// Wrapper for anyhow errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl ChatError {
    /// Map a transport failure, keeping timeouts distinguishable.
    ///
    /// The URL is stripped so query parameters never reach logs.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::TimeoutError
        } else {
            ChatError::NetworkError {
                message: err.without_url().to_string(),
            }
        }
    }
}

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::InternalError(err.to_string())
    }
}

/// Result type for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;
