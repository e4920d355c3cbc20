//! Promptflow Queue
//!
//! In-memory implementations of the execution-queue and usage-metering
//! contracts defined in `promptflow-domain`.
//!
//! - [`InMemoryJobQueue`]: tracks jobs through
//!   `pending → running → completed | failed | cancelled`, with retries
//! - [`InMemoryUsageMeter`]: counts consumption per quota against optional limits
//!
//! # Examples
//!
//! ```
//! use promptflow_domain::{JobQueue, JobRequest, JobStatus};
//! use promptflow_queue::InMemoryJobQueue;
//!
//! let mut queue = InMemoryJobQueue::new();
//! let job = queue.enqueue(JobRequest::new("cursor", "Build a login page")).unwrap();
//!
//! let job = queue.start(job.id).unwrap();
//! assert_eq!(job.status, JobStatus::Running);
//! assert!(job.started_at.is_some());
//! ```

#![warn(missing_docs)]

mod error;
mod queue;
mod usage;

pub use error::QueueError;
pub use queue::InMemoryJobQueue;
pub use usage::InMemoryUsageMeter;
