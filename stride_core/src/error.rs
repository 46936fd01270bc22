//! Error types for the stride_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for stride_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A constructor or transform received an argument it cannot accept
    /// (zero step, a step whose negation overflows, an unrepresentable date).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An iterator was advanced past its last element
    #[error("No such element: progression is exhausted")]
    NoSuchElement,

    /// Progression iterators are read-only views
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Date or time text could not be parsed
    #[error("Date parse error: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
