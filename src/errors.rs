//! Error types for ISPA Predict
//!
//! One error enum for the library layers; the binary and the REPL wrap it
//! in `anyhow` at the edges.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the prediction system
#[derive(Error, Debug)]
pub enum IspaError {
    /// A model artifact is missing or unreadable
    #[error("Failed to load model artifact {path}: {reason}")]
    ArtifactLoad { path: PathBuf, reason: String },

    /// Model artifacts were readable but inconsistent
    #[error("Invalid model artifact: {0}")]
    ModelShape(String),

    /// State machine transition errors
    #[error("Invalid state transition from {from} via {event}")]
    InvalidTransition { from: String, event: String },

    /// Form validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    /// History file errors
    #[error("History file error: {0}")]
    History(#[from] csv::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, IspaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_error_display() {
        let err = IspaError::ArtifactLoad {
            path: PathBuf::from("model_naive_bayes.json"),
            reason: "No such file or directory".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("model_naive_bayes.json"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn test_invalid_transition_error() {
        let err = IspaError::InvalidTransition {
            from: "Completed".to_string(),
            event: "Submit".to_string(),
        };
        assert!(err.to_string().contains("Completed"));
        assert!(err.to_string().contains("Submit"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: IspaError = io.into();
        assert!(matches!(err, IspaError::IoError(_)));
    }
}
