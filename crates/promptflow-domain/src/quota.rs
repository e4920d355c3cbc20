//! Metered resources

use std::fmt;

/// A resource whose consumption is counted against a plan limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuotaType {
    /// Characters of source text submitted for batch extraction
    BatchExtractionChars,

    /// Prompts passed through the optimizer
    PromptOptimizations,

    /// Jobs submitted to the execution queue
    ExecutionJobs,
}

impl QuotaType {
    /// All quota types
    pub const ALL: [QuotaType; 3] = [
        QuotaType::BatchExtractionChars,
        QuotaType::PromptOptimizations,
        QuotaType::ExecutionJobs,
    ];

    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaType::BatchExtractionChars => "batch_extraction_chars",
            QuotaType::PromptOptimizations => "prompt_optimizations",
            QuotaType::ExecutionJobs => "execution_jobs",
        }
    }

    /// Parse a quota type from its name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == s)
    }
}

impl fmt::Display for QuotaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
