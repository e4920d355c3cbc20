//! Queue error types

use promptflow_domain::{JobId, JobStatus, QuotaType};
use thiserror::Error;

/// Errors that can occur during queue and metering operations
#[derive(Error, Debug, PartialEq)]
pub enum QueueError {
    /// Job not found
    #[error("Job not found: {0}")]
    NotFound(JobId),

    /// Status change not allowed from the current status
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status
        from: JobStatus,
        /// Requested status
        to: JobStatus,
    },

    /// Usage limit reached
    #[error("Limit reached for {quota}: {used} of {limit} used, {requested} requested")]
    LimitReached {
        /// Quota whose limit was hit
        quota: QuotaType,
        /// Amount already used
        used: u64,
        /// Configured limit
        limit: u64,
        /// Amount requested
        requested: u64,
    },
}
