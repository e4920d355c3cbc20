//! Result types for extraction

use promptflow_domain::ExtractedPrompt;

/// Prompts together with a summary of the run
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// Extracted prompts in order of appearance
    pub prompts: Vec<ExtractedPrompt>,

    /// Counters describing the run
    pub summary: ExtractionSummary,
}

/// Counters describing one extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Characters of input after normalization
    pub source_chars: usize,

    /// Fragments produced by segmentation
    pub fragments_considered: usize,

    /// Fragments removed by the length and boilerplate filters
    pub fragments_dropped: usize,

    /// Prompts produced
    pub prompt_count: usize,

    /// Sum of the prompts' token estimates
    pub total_estimated_tokens: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
