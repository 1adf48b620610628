//! Error types for the untoc library.

use std::io;
use thiserror::Error;

/// Result type alias for untoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during outline inference.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration (unknown strategy name, missing backend, bad
    /// threshold). Configuration errors are fatal and are raised before any
    /// document is processed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A single document failed during extraction. Recoverable: batch
    /// processing logs it and continues with the remaining documents.
    #[error("Document '{name}' failed: {message}")]
    Document {
        /// Identifying label for the failed document (usually the file stem).
        name: String,
        /// Human-readable failure description.
        message: String,
    },

    /// The input text element stream violates the model contract
    /// (inverted bounding box, non-positive font size, malformed dump).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Classifier backend failure during label prediction.
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Error serializing the outline report.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

impl Error {
    /// Wrap any error as a per-document failure with an identifying label.
    pub fn for_document(name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Error::Document {
            name: name.into(),
            message: err.to_string(),
        }
    }

    /// Whether this error aborts the whole run (configuration errors do,
    /// per-document errors do not).
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("unknown strategy: foo".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown strategy: foo"
        );

        let err = Error::for_document("report-2024", "zero pages");
        assert_eq!(err.to_string(), "Document 'report-2024' failed: zero pages");
    }

    #[test]
    fn test_fatality() {
        assert!(Error::Config("x".into()).is_fatal());
        assert!(!Error::for_document("d", "y").is_fatal());
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        assert!(!Error::from(io_err).is_fatal());
    }
}
