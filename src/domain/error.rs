//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected whole seconds: <number>, <number>s, <number>m, or <number>m<number>s (e.g., 5, 30s, 1m, 2m30s), between 1s and 24h")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when an unsupported audio format is requested
#[derive(Debug, Clone, Error)]
#[error("Unsupported audio format: \"{input}\". Accepted formats: wav, mp3, flac")]
pub struct UnsupportedFormatError {
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
