//! Error hierarchy for zipwx.
//!
//! Library crates keep their own error enums. The panel maps them into
//! [`AppError`], which is what gets logged and what the terminal turns into
//! a one-line message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Short message for the panel user. Details stay in the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Fetch(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
        }
    }
}

/// Why the current weather for a postal code could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("weather service unreachable: {0}")]
    Unreachable(String),

    #[error("request timed out")]
    Timeout,

    #[error("postal code unknown to the weather service: {0}")]
    UnknownPostalCode(String),

    #[error("API key rejected")]
    ApiKeyRejected,

    #[error("weather service down (HTTP {status})")]
    ServiceDown { status: u16 },

    #[error("request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected payload: {0}")]
    BadPayload(String),
}

impl FetchError {
    /// Classify a non-success HTTP status from the weather API.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => FetchError::ApiKeyRejected,
            404 => FetchError::UnknownPostalCode(message),
            s if s >= 500 => FetchError::ServiceDown { status: s },
            s => FetchError::Rejected { status: s, message },
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Unreachable(_) => "Unable to reach the weather service. Check your connection.",
            FetchError::Timeout => "The weather service did not answer in time.",
            FetchError::UnknownPostalCode(_) => "Postal code not found. Check and try again.",
            FetchError::ApiKeyRejected => "Weather API key is invalid. Check settings.",
            FetchError::ServiceDown { .. } => "Weather service unavailable. Please try again later.",
            FetchError::Rejected { .. } => "The weather service rejected the request.",
            FetchError::BadPayload(_) => "Received unreadable weather data.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("no API key in config or {}", crate::config::API_KEY_ENV)]
    MissingApiKey,
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::MissingApiKey => "No weather API key configured. Every fetch will fail.",
        }
    }
}

/// The location document could not be read or written.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("read failed: {0}")]
    ReadFailed(String),

    #[error("write failed: {0}")]
    WriteFailed(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::ReadFailed(_) => "Saved locations could not be read and were reset.",
            StorageError::WriteFailed(_) => "Your locations could not be saved.",
        }
    }
}

/// Extension trait for classifying transport-level reqwest errors.
pub trait ReqwestErrorExt {
    fn into_fetch_error(self) -> FetchError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_fetch_error(self) -> FetchError {
        if self.is_timeout() {
            FetchError::Timeout
        } else if self.is_decode() {
            FetchError::BadPayload(self.to_string())
        } else if let Some(status) = self.status() {
            FetchError::from_status(status.as_u16(), self.to_string())
        } else {
            FetchError::Unreachable(self.to_string())
        }
    }
}
