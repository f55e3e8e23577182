//! Error types for the jobguard library.
//!
//! All fallible operations in the crate return [`JobGuardError`] through the
//! [`Result`] alias. The variants separate failures caused by the caller
//! (empty or malformed input) from failures of the loaded model or the host,
//! which lets the HTTP layer decide between a 4xx and a 5xx response.
//!
//! # Examples
//!
//! ```
//! use jobguard::error::{JobGuardError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(JobGuardError::invalid_input("Please enter a job description."))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => assert!(e.is_client_error()),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::ml::MLError;

/// The main error type for jobguard operations.
#[derive(Error, Debug)]
pub enum JobGuardError {
    /// I/O errors (model files, datasets)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The submitted text was empty or whitespace only
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// The submitted request was malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model state or training errors
    #[error("Model error: {0}")]
    Model(#[from] MLError),

    /// Word-cloud rendering errors
    #[error("Rendering error: {0}")]
    Rendering(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with JobGuardError.
pub type Result<T> = std::result::Result<T, JobGuardError>;

impl JobGuardError {
    /// Create a new empty input error.
    pub fn empty_input<S: Into<String>>(msg: S) -> Self {
        JobGuardError::EmptyInput(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        JobGuardError::InvalidInput(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        JobGuardError::Analysis(msg.into())
    }

    /// Create a new rendering error.
    pub fn rendering<S: Into<String>>(msg: S) -> Self {
        JobGuardError::Rendering(msg.into())
    }

    /// Create a new invalid configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        JobGuardError::Config(msg.into())
    }

    /// Whether the error was caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            JobGuardError::EmptyInput(_) | JobGuardError::InvalidInput(_)
        )
    }
}
