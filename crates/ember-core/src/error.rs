//! Error types for Ember

use thiserror::Error;

/// The main error type for Ember operations
#[derive(Debug, Error)]
pub enum EmberError {
    #[error("Value out of range: {field} must be at least {min}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        value: f64,
    },

    #[error("Invalid bounds: {field} minimum {min} exceeds maximum {max}")]
    InvalidBounds { field: String, min: f64, max: f64 },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Ember operations
pub type Result<T> = std::result::Result<T, EmberError>;

impl From<toml::de::Error> for EmberError {
    fn from(err: toml::de::Error) -> Self {
        EmberError::TomlParseError(err.to_string())
    }
}
