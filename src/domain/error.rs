//! Domain error types

use thiserror::Error;

/// Error when parsing a playback timeout string
#[derive(Debug, Clone, Error)]
#[error("Invalid timeout: \"{input}\". Expected seconds (e.g., 30) or a duration such as 500ms, 30s, 1m, 1m30s")]
pub struct TimeoutParseError {
    pub input: String,
}

/// Error when a volume level is outside 0.0..=1.0
#[derive(Debug, Clone, Error)]
#[error("Invalid volume: \"{input}\". Expected a number between 0.0 and 1.0")]
pub struct VolumeError {
    pub input: String,
}

/// Error when an unknown sound source is requested
#[derive(Debug, Clone, Error)]
#[error("Invalid sound source: \"{input}\". Valid sources are: default, custom, auto")]
pub struct InvalidSourceError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Fatal conditions detected before any request is served
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Default notification sound is missing: {path}")]
    MissingDefaultAsset { path: String },

    #[error("Failed to install default notification sound at {path}: {reason}")]
    InstallFailed { path: String, reason: String },
}
