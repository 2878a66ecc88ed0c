use thiserror::Error;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading/validation error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Backend exchange error.
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// Internal protocol type error.
    #[error("Proto error: {0}")]
    Proto(#[from] ProtoError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field has an invalid value and reason.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// Filesystem read error.
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(String),
}

/// Failure of a single backend exchange.
///
/// Adapters turn every variant into a fixed, human-readable bot message;
/// none of these reach the renderer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// Required input or resource is missing; no request was made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Backend answered with a non-2xx status.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Network failure or undecodable response body.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Internal proto errors
#[derive(Debug, Error)]
pub enum ProtoError {
    /// Invalid message origin string.
    #[error("Invalid origin: {0}")]
    InvalidOrigin(String),

    /// Unknown feature name.
    #[error("Unknown feature: {0}")]
    InvalidFeature(String),
}
