// src/errors.rs

use thiserror::Error;

pub type ConfabResult<T> = Result<T, ConfabError>;

/// Errors surfaced by the chat client.
///
/// Reply failures carry the bare failure reason so callers can prefix
/// them for display without doubling up on context.
#[derive(Debug, Error)]
pub enum ConfabError {
    #[error("{message}")]
    Api { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ConfabError {
    pub fn api_error(message: impl Into<String>) -> Self {
        ConfabError::Api {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        ConfabError::Config {
            message: message.into(),
        }
    }
}
