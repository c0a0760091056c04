//! Error types for relay-bot.

use thiserror::Error;

/// Main error type for relay-bot operations.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Telegram Bot API request failed.
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Outbound HTTP client error outside of a service call.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested document is not part of the content store.
    #[error("document not found: {0}")]
    ContentNotFound(String),

    /// A URL could not be parsed.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// Configuration is incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Convenience Result type for relay-bot operations.
pub type Result<T> = std::result::Result<T, RelayError>;
