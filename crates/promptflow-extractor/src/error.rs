//! Error types for the Extractor
//!
//! Plain extraction has no failure mode; these errors come from configuration
//! and from quota-gated extraction.

use promptflow_domain::QuotaType;
use thiserror::Error;

/// Errors that can occur around extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Usage quota would be exceeded
    #[error("Quota exceeded: {quota} (requested {requested})")]
    QuotaExceeded {
        /// Quota that refused the request
        quota: QuotaType,
        /// Amount that was requested
        requested: u64,
    },

    /// Usage meter failed
    #[error("Usage meter error: {0}")]
    Meter(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
