//! In-memory job queue

use crate::error::QueueError;
use promptflow_domain::traits::{JobFilter, JobQueue};
use promptflow_domain::{now_secs, ExecutionJob, ExtractedPrompt, JobId, JobRequest, JobStatus};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Job queue that keeps every job in memory
///
/// Jobs are listed in submission order. Terminal jobs stay visible until
/// [`InMemoryJobQueue::clear_finished`] evicts them.
#[derive(Debug, Default)]
pub struct InMemoryJobQueue {
    jobs: HashMap<JobId, ExecutionJob>,
    order: Vec<JobId>,
}

impl InMemoryJobQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked jobs
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the queue tracks no jobs
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Submit every prompt as a job under one freshly generated batch id.
    ///
    /// Returns the batch id and the created jobs in prompt order.
    pub fn enqueue_batch(
        &mut self,
        tool_target: &str,
        prompts: &[ExtractedPrompt],
        priority: i32,
    ) -> (String, Vec<ExecutionJob>) {
        let batch_id = uuid::Uuid::now_v7().to_string();

        let jobs: Vec<ExecutionJob> = prompts
            .iter()
            .map(|prompt| {
                self.insert(
                    JobRequest::new(tool_target, prompt.content())
                        .with_batch(batch_id.clone())
                        .with_priority(priority),
                )
            })
            .collect();

        info!(
            "Queued batch {} with {} jobs for '{}'",
            batch_id,
            jobs.len(),
            tool_target
        );
        (batch_id, jobs)
    }

    /// Mark a pending job as running
    pub fn start(&mut self, id: JobId) -> Result<ExecutionJob, QueueError> {
        self.transition(id, JobStatus::Running, None)
    }

    /// Mark a running job as completed
    pub fn complete(&mut self, id: JobId) -> Result<ExecutionJob, QueueError> {
        self.transition(id, JobStatus::Completed, None)
    }

    /// Mark a running job as failed
    pub fn fail(&mut self, id: JobId, message: impl Into<String>) -> Result<ExecutionJob, QueueError> {
        self.transition(id, JobStatus::Failed, Some(message.into()))
    }

    /// Cancel a pending or running job
    pub fn cancel(&mut self, id: JobId) -> Result<ExecutionJob, QueueError> {
        self.transition(id, JobStatus::Cancelled, None)
    }

    /// Send a failed or cancelled job back to pending
    pub fn retry(&mut self, id: JobId) -> Result<ExecutionJob, QueueError> {
        self.transition(id, JobStatus::Pending, None)
    }

    /// The pending job to run next: highest priority, oldest first
    pub fn next_pending(&self) -> Option<&ExecutionJob> {
        self.order
            .iter()
            .filter_map(|id| self.jobs.get(id))
            .filter(|job| job.status == JobStatus::Pending)
            .fold(None, |best: Option<&ExecutionJob>, job| match best {
                Some(b) if b.priority >= job.priority => Some(b),
                _ => Some(job),
            })
    }

    /// All jobs of a batch in submission order
    pub fn jobs_for_batch(&self, batch_id: &str) -> Vec<ExecutionJob> {
        self.select(&JobFilter {
            batch_id: Some(batch_id.to_string()),
            ..Default::default()
        })
    }

    /// Evict jobs in a terminal status; returns how many were removed
    pub fn clear_finished(&mut self) -> usize {
        let finished: HashSet<JobId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.jobs.get(id).is_some_and(|job| job.status.is_terminal()))
            .collect();

        for id in &finished {
            self.jobs.remove(id);
        }
        self.order.retain(|id| !finished.contains(id));

        debug!("Evicted {} finished jobs", finished.len());
        finished.len()
    }

    fn insert(&mut self, request: JobRequest) -> ExecutionJob {
        let job = ExecutionJob::from_request(request, now_secs());
        self.order.push(job.id);
        self.jobs.insert(job.id, job.clone());
        job
    }

    fn select(&self, filter: &JobFilter) -> Vec<ExecutionJob> {
        self.order
            .iter()
            .filter_map(|id| self.jobs.get(id))
            .filter(|job| filter.matches(job))
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    fn transition(
        &mut self,
        id: JobId,
        to: JobStatus,
        error_message: Option<String>,
    ) -> Result<ExecutionJob, QueueError> {
        let job = self.jobs.get_mut(&id).ok_or(QueueError::NotFound(id))?;
        let from = job.status;

        if !from.can_transition_to(to) {
            return Err(QueueError::InvalidTransition { from, to });
        }

        let now = now_secs();
        job.status = to;
        match to {
            JobStatus::Pending => {
                job.error_message = None;
                job.started_at = None;
                job.completed_at = None;
            }
            JobStatus::Running => job.started_at = Some(now),
            JobStatus::Failed => {
                job.error_message = error_message;
                job.completed_at = Some(now);
            }
            JobStatus::Completed | JobStatus::Cancelled => job.completed_at = Some(now),
        }

        debug!("Job {} moved {} -> {}", id, from, to);
        Ok(job.clone())
    }
}

impl JobQueue for InMemoryJobQueue {
    type Error = QueueError;

    fn enqueue(&mut self, request: JobRequest) -> Result<ExecutionJob, Self::Error> {
        let job = self.insert(request);
        debug!("Queued job {} for '{}'", job.id, job.tool_target);
        Ok(job)
    }

    fn get_job(&self, id: JobId) -> Result<Option<ExecutionJob>, Self::Error> {
        Ok(self.jobs.get(&id).cloned())
    }

    fn update_status(
        &mut self,
        id: JobId,
        status: JobStatus,
        error_message: Option<String>,
    ) -> Result<ExecutionJob, Self::Error> {
        self.transition(id, status, error_message)
    }

    fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<ExecutionJob>, Self::Error> {
        Ok(self.select(filter))
    }
}
