//! Integration tests: extraction feeding the job queue under usage limits

use promptflow_domain::{JobFilter, JobQueue, JobStatus, QuotaType, UsageMeter};
use promptflow_extractor::{ExtractorError, PromptExtractor};
use promptflow_queue::{InMemoryJobQueue, InMemoryUsageMeter, QueueError};

const BATCH: &str = "1. Build a login page\n2. Build a signup page\n3. Build a dashboard page";

#[test]
fn test_extracted_batch_runs_to_completion() {
    let prompts = PromptExtractor::default().extract(BATCH);
    let mut queue = InMemoryJobQueue::new();

    let (batch_id, jobs) = queue.enqueue_batch("cursor", &prompts, 1);
    assert_eq!(jobs.len(), 3);
    assert!(jobs.iter().all(|j| j.status == JobStatus::Pending));
    assert_eq!(jobs[1].execution_data, "Build a signup page");

    while let Some(id) = queue.next_pending().map(|j| j.id) {
        queue.start(id).unwrap();
        queue.complete(id).unwrap();
    }

    let finished = queue.jobs_for_batch(&batch_id);
    assert_eq!(finished.len(), 3);
    assert!(finished
        .iter()
        .all(|j| j.status == JobStatus::Completed && j.completed_at.is_some()));
}

#[test]
fn test_list_jobs_filters_and_limits() {
    let prompts = PromptExtractor::default().extract(BATCH);
    let mut queue = InMemoryJobQueue::new();
    let (batch_id, jobs) = queue.enqueue_batch("cursor", &prompts, 0);
    queue.start(jobs[0].id).unwrap();

    let pending = queue
        .list_jobs(&JobFilter {
            status: Some(JobStatus::Pending),
            batch_id: Some(batch_id.clone()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(pending.len(), 2);

    let limited = queue
        .list_jobs(&JobFilter {
            limit: Some(1),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, jobs[0].id);
}

#[test]
fn test_invalid_transitions_are_rejected() {
    let mut queue = InMemoryJobQueue::new();
    let job = queue
        .enqueue(promptflow_domain::JobRequest::new("cursor", "Build it"))
        .unwrap();

    assert_eq!(
        queue.complete(job.id),
        Err(QueueError::InvalidTransition {
            from: JobStatus::Pending,
            to: JobStatus::Completed,
        })
    );

    queue.start(job.id).unwrap();
    queue.complete(job.id).unwrap();
    assert!(queue.retry(job.id).is_err());

    let unknown = promptflow_domain::JobId::new();
    assert_eq!(queue.start(unknown), Err(QueueError::NotFound(unknown)));
}

#[test]
fn test_status_updates_through_trait() {
    let mut queue = InMemoryJobQueue::new();
    let job = queue
        .enqueue(promptflow_domain::JobRequest::new("cursor", "Build it"))
        .unwrap();

    queue.update_status(job.id, JobStatus::Running, None).unwrap();
    let failed = queue
        .update_status(job.id, JobStatus::Failed, Some("exit code 1".to_string()))
        .unwrap();

    assert_eq!(failed.error_message.as_deref(), Some("exit code 1"));
    assert_eq!(queue.get_job(job.id).unwrap(), Some(failed));
}

#[test]
fn test_extraction_quota_gates_batches() {
    let extractor = PromptExtractor::default();
    let mut meter = InMemoryUsageMeter::new().with_limit(QuotaType::BatchExtractionChars, 100);

    let prompts = extractor.extract_metered(BATCH, &mut meter).unwrap();
    assert_eq!(prompts.len(), 3);
    assert_eq!(
        meter.usage(QuotaType::BatchExtractionChars),
        BATCH.chars().count() as u64
    );

    let second = extractor.extract_metered(BATCH, &mut meter);
    assert!(matches!(second, Err(ExtractorError::QuotaExceeded { .. })));
    assert!(!meter
        .check_usage_limit(QuotaType::BatchExtractionChars, 50)
        .unwrap());
}
