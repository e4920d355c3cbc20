//! Promptflow Domain Layer
//!
//! Value objects and trait seams shared by every other promptflow crate.
//! The only external dependency is `uuid`, used for identifier generation.
//!
//! ## Key Concepts
//!
//! - **ExtractedPrompt**: one candidate prompt cut out of freeform text
//! - **ExecutionJob**: a prompt submitted to a tool, tracked through its status lifecycle
//! - **QuotaType**: a metered resource (e.g. characters submitted for batch extraction)
//!
//! Storage and accounting live behind the [`traits::JobQueue`] and
//! [`traits::UsageMeter`] traits; implementations live in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod job;
pub mod prompt;
pub mod quota;
pub mod traits;

pub use job::{ExecutionJob, JobId, JobRequest, JobStatus};
pub use prompt::{ExtractedPrompt, PromptId};
pub use quota::QuotaType;
pub use traits::{JobFilter, JobQueue, UsageMeter};

/// Current time as Unix seconds.
pub fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
