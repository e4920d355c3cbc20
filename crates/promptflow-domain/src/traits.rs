//! Trait definitions for external interactions
//!
//! These traits mark the boundary between domain values and whatever keeps
//! jobs and usage counters. Implementations live in other crates.

use crate::{ExecutionJob, JobId, JobRequest, JobStatus, QuotaType};

/// Trait for submitting and tracking execution jobs
///
/// Implemented by the infrastructure layer (promptflow-queue)
pub trait JobQueue {
    /// Error type for queue operations
    type Error;

    /// Submit a job; it starts out pending
    fn enqueue(&mut self, request: JobRequest) -> Result<ExecutionJob, Self::Error>;

    /// Get a job by ID
    fn get_job(&self, id: JobId) -> Result<Option<ExecutionJob>, Self::Error>;

    /// Move a job to a new status, recording an error message for failures
    fn update_status(
        &mut self,
        id: JobId,
        status: JobStatus,
        error_message: Option<String>,
    ) -> Result<ExecutionJob, Self::Error>;

    /// List jobs matching criteria, oldest first
    fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<ExecutionJob>, Self::Error>;
}

/// Query criteria for listing jobs
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Filter by status
    pub status: Option<JobStatus>,

    /// Filter by batch
    pub batch_id: Option<String>,

    /// Filter by target tool
    pub tool_target: Option<String>,

    /// Maximum results to return
    pub limit: Option<usize>,
}

impl JobFilter {
    /// Whether a job satisfies every set criterion (limit aside)
    pub fn matches(&self, job: &ExecutionJob) -> bool {
        self.status.is_none_or(|s| job.status == s)
            && self
                .batch_id
                .as_deref()
                .is_none_or(|b| job.batch_id.as_deref() == Some(b))
            && self
                .tool_target
                .as_deref()
                .is_none_or(|t| job.tool_target == t)
    }
}

/// Trait for plan usage accounting
///
/// Implemented by the infrastructure layer (promptflow-queue)
pub trait UsageMeter {
    /// Error type for metering operations
    type Error;

    /// Whether consuming `amount` more of `quota` stays within the limit
    fn check_usage_limit(&self, quota: QuotaType, amount: u64) -> Result<bool, Self::Error>;

    /// Record consumption of `amount` of `quota`
    fn increment_usage(&mut self, quota: QuotaType, amount: u64) -> Result<(), Self::Error>;
}
