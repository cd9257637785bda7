//! Error types for textmetrics operations.
//!
//! This module defines the main error type [`MetricsError`] which covers
//! fetching, text extraction, lexicon loading, scoring and workbook I/O.
//!
//! Errors split into two tiers. Record-local errors (see
//! [`MetricsError::is_record_local`]) only cost the current row a null score
//! vector; everything else ends the run.
//!
//! # Example
//!
//! ```rust
//! use textmetrics_core::{MetricsError, Result};
//!
//! fn require_text(text: &str) -> Result<&str> {
//!     if text.trim().is_empty() {
//!         return Err(MetricsError::NoContent);
//!     }
//!     Ok(text)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the metrics pipeline.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No text could be extracted from the document.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Wraps standard I/O errors for file and directory operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook could not be opened, read or saved.
    #[error("Workbook error: {0}")]
    WorkbookError(String),

    /// A required header is absent from the first row of the worksheet.
    #[error("Column {0:?} not found in the header row")]
    MissingColumn(String),

    /// The sentiment model could not be loaded.
    #[error("Model initialization failed: {0}")]
    ModelInit(String),

    /// The sentiment model's tokenizer rejected the input.
    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    /// A scorer failed on one document.
    #[error("Scoring failed: {0}")]
    ScoringError(String),

    /// Requested functionality was compiled out.
    #[error("Feature not enabled: {0}")]
    FeatureDisabled(&'static str),
}

impl MetricsError {
    /// Returns true when the error only affects the record being processed.
    ///
    /// Extraction failures (bad URL, network, timeout, unparseable page) are
    /// absorbed by the pipeline as a null score vector for that row.
    pub fn is_record_local(&self) -> bool {
        match self {
            #[cfg(feature = "fetch")]
            MetricsError::HttpError(_) => true,
            MetricsError::Timeout { .. }
            | MetricsError::InvalidUrl(_)
            | MetricsError::HtmlParseError(_)
            | MetricsError::NoContent => true,
            _ => false,
        }
    }
}

/// Result type alias for MetricsError.
pub type Result<T> = std::result::Result<T, MetricsError>;
