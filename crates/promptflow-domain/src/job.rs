//! Job module - prompts submitted for execution by a local tool

use std::fmt;

/// Unique identifier for an execution job (UUIDv7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(u128);

impl JobId {
    /// Generate a new UUIDv7-based JobId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a JobId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a JobId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid job id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Status of an execution job
///
/// Jobs start out `Pending`, move to `Running` when a tool picks them up and
/// end `Completed`, `Failed` or `Cancelled`. Failed and cancelled jobs can be
/// sent back to `Pending` for a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    /// Waiting for a tool to pick it up
    Pending,

    /// Being executed
    Running,

    /// Finished successfully
    Completed,

    /// Finished with an error
    Failed,

    /// Withdrawn before finishing
    Cancelled,
}

impl JobStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(JobStatus::Pending),
            "running" => Some(JobStatus::Running),
            "completed" => Some(JobStatus::Completed),
            "failed" => Some(JobStatus::Failed),
            "cancelled" => Some(JobStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether the job has stopped executing
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    /// Whether a job in this status may move to `next`
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        use JobStatus::*;
        matches!(
            (self, next),
            (Pending, Running)
                | (Pending, Cancelled)
                | (Running, Completed)
                | (Running, Failed)
                | (Running, Cancelled)
                | (Failed, Pending)
                | (Cancelled, Pending)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid job status: {}", s))
    }
}

/// Request to submit a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    /// Tool that should execute the job
    pub tool_target: String,

    /// Payload handed to the tool, usually prompt content
    pub execution_data: String,

    /// Optional grouping identifier shared by a batch of jobs
    pub batch_id: Option<String>,

    /// Higher values are picked up first
    pub priority: i32,
}

impl JobRequest {
    /// Create a request with no batch and default priority
    pub fn new(tool_target: impl Into<String>, execution_data: impl Into<String>) -> Self {
        Self {
            tool_target: tool_target.into(),
            execution_data: execution_data.into(),
            batch_id: None,
            priority: 0,
        }
    }

    /// Attach a batch identifier
    pub fn with_batch(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = Some(batch_id.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// A job record as tracked by a queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionJob {
    /// Unique identifier
    pub id: JobId,

    /// Tool that should execute the job
    pub tool_target: String,

    /// Payload handed to the tool
    pub execution_data: String,

    /// Optional batch grouping
    pub batch_id: Option<String>,

    /// Scheduling priority
    pub priority: i32,

    /// Current status
    pub status: JobStatus,

    /// Failure detail, set when the job fails
    pub error_message: Option<String>,

    /// When the job was submitted (Unix seconds)
    pub created_at: u64,

    /// When the job started running
    pub started_at: Option<u64>,

    /// When the job reached a terminal status
    pub completed_at: Option<u64>,
}

impl ExecutionJob {
    /// Build a pending job from a request
    pub fn from_request(request: JobRequest, created_at: u64) -> Self {
        Self {
            id: JobId::new(),
            tool_target: request.tool_target,
            execution_data: request.execution_data,
            batch_id: request.batch_id,
            priority: request.priority,
            status: JobStatus::Pending,
            error_message: None,
            created_at,
            started_at: None,
            completed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert!(JobStatus::Pending.can_transition_to(JobStatus::Running));
        assert!(JobStatus::Running.can_transition_to(JobStatus::Completed));
        assert!(JobStatus::Running.can_transition_to(JobStatus::Failed));
        assert!(JobStatus::Pending.can_transition_to(JobStatus::Cancelled));
    }

    #[test]
    fn test_rejected_transitions() {
        assert!(!JobStatus::Pending.can_transition_to(JobStatus::Completed));
        assert!(!JobStatus::Completed.can_transition_to(JobStatus::Pending));
        assert!(!JobStatus::Completed.can_transition_to(JobStatus::Running));
        assert!(!JobStatus::Running.can_transition_to(JobStatus::Running));
    }

    #[test]
    fn test_retry_transitions() {
        assert!(JobStatus::Failed.can_transition_to(JobStatus::Pending));
        assert!(JobStatus::Cancelled.can_transition_to(JobStatus::Pending));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Running".parse::<JobStatus>(), Ok(JobStatus::Running));
        assert_eq!(JobStatus::parse("cancelled"), Some(JobStatus::Cancelled));
        assert!("done".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_job_from_request() {
        let request = JobRequest::new("cursor", "Build a login page")
            .with_batch("batch-1")
            .with_priority(5);
        let job = ExecutionJob::from_request(request, 1000);

        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.batch_id.as_deref(), Some("batch-1"));
        assert_eq!(job.priority, 5);
        assert_eq!(job.created_at, 1000);
        assert!(job.started_at.is_none());
    }
}
