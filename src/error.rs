//! Error types for the synt library.
//!
//! All fallible operations return [`Result`], with [`SyntError`] covering the
//! full taxonomy: configuration errors are rejected before any I/O, store
//! errors are fatal and never leave partial state behind, and extractor
//! mismatches are caught at model load time.
//!
//! # Examples
//!
//! ```
//! use synt::error::{SyntError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SyntError::config("best_features requires the bestwords extractor"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for synt operations.
#[derive(Error, Debug)]
pub enum SyntError {
    /// I/O errors (sample table reads, model store writes, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration (bad strategy/parameter combination), rejected
    /// before any work begins.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors (tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Store-related errors (sample table or model store unreachable)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A requested entry does not exist in the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// A model was loaded with a different extractor than it was trained with
    #[error("Model mismatch: {0}")]
    ModelMismatch(String),

    /// A parallel training worker failed; the whole run is aborted
    #[error("Worker error: {0}")]
    Worker(String),

    /// Serialization error (model artifacts, sample rows)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SyntError.
pub type Result<T> = std::result::Result<T, SyntError>;

impl SyntError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SyntError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SyntError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        SyntError::Storage(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        SyntError::NotFound(msg.into())
    }

    /// Create a new model mismatch error.
    pub fn model_mismatch<S: Into<String>>(msg: S) -> Self {
        SyntError::ModelMismatch(msg.into())
    }

    /// Create a new worker error.
    pub fn worker<S: Into<String>>(msg: S) -> Self {
        SyntError::Worker(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        SyntError::Serialization(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        SyntError::InvalidOperation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SyntError::config("Test config error");
        assert_eq!(error.to_string(), "Configuration error: Test config error");

        let error = SyntError::storage("Test storage error");
        assert_eq!(error.to_string(), "Storage error: Test storage error");

        let error = SyntError::model_mismatch("trained with words, loaded with bestwords");
        assert_eq!(
            error.to_string(),
            "Model mismatch: trained with words, loaded with bestwords"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let synt_error = SyntError::from(io_error);

        match synt_error {
            SyntError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
