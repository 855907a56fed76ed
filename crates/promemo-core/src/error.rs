//! Unified error types for Promemo.

use thiserror::Error;

/// Result type alias using PromemoError.
pub type Result<T> = std::result::Result<T, PromemoError>;

#[derive(Error, Debug)]
pub enum PromemoError {
    // Command errors
    #[error("{0}")]
    MalformedCommand(String),

    // Store errors
    #[error("Store error: {0}")]
    Store(String),

    // Channel errors
    #[error("Channel error: {0}")]
    Channel(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl PromemoError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedCommand(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PromemoError::Store("disk full".into());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_malformed_is_verbatim() {
        // The malformed-command text is sent back to the user as-is.
        let err = PromemoError::malformed("Invalid format.");
        assert_eq!(err.to_string(), "Invalid format.");
    }

    #[test]
    fn test_error_constructors() {
        let e1 = PromemoError::store("test");
        assert!(matches!(e1, PromemoError::Store(_)));

        let e2 = PromemoError::channel("test");
        assert!(matches!(e2, PromemoError::Channel(_)));

        let e3 = PromemoError::config("test");
        assert!(matches!(e3, PromemoError::Config(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PromemoError = io_err.into();
        assert!(matches!(err, PromemoError::Io(_)));
    }
}
