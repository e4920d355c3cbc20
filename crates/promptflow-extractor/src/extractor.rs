//! Core PromptExtractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::filter::keep_fragment;
use crate::segmenter::{normalize, segment};
use crate::types::{ExtractionOutcome, ExtractionSummary};
use promptflow_domain::traits::UsageMeter;
use promptflow_domain::{ExtractedPrompt, PromptId, QuotaType};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Characters per token used by [`estimate_tokens`]
const DEFAULT_CHARS_PER_TOKEN: usize = 4;

/// Estimate the token cost of `content` at four characters per token, rounded up
pub fn estimate_tokens(content: &str) -> usize {
    content.chars().count().div_ceil(DEFAULT_CHARS_PER_TOKEN)
}

/// Extract prompts from `text` with the default configuration
pub fn extract_prompts(text: &str) -> Vec<ExtractedPrompt> {
    PromptExtractor::default().extract(text)
}

/// The PromptExtractor splits freeform text into candidate prompts
///
/// Extraction is a pure function of its input and the configuration. It
/// keeps no state between calls, so one extractor can be shared freely
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct PromptExtractor {
    config: ExtractorConfig,
}

impl PromptExtractor {
    /// Create a new PromptExtractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Create a PromptExtractor after validating the configuration
    pub fn try_new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self::new(config))
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract prompts from text
    pub fn extract(&self, text: &str) -> Vec<ExtractedPrompt> {
        self.extract_with_summary(text).prompts
    }

    /// Extract prompts from raw bytes, replacing invalid UTF-8 sequences
    pub fn extract_bytes(&self, bytes: &[u8]) -> Vec<ExtractedPrompt> {
        self.extract(&String::from_utf8_lossy(bytes))
    }

    /// Extract prompts and report counters about the run
    pub fn extract_with_summary(&self, text: &str) -> ExtractionOutcome {
        let start_time = Instant::now();

        let normalized = normalize(self.bounded(text));
        let fragments = segment(&normalized);
        let fragments_considered = fragments.len();

        let prompts: Vec<ExtractedPrompt> = fragments
            .into_iter()
            .filter_map(|fragment| keep_fragment(fragment, &self.config))
            .enumerate()
            .map(|(position, content)| {
                ExtractedPrompt::new(
                    PromptId::new(),
                    content,
                    self.estimate_tokens(content),
                    position,
                )
            })
            .collect();

        let summary = ExtractionSummary {
            source_chars: normalized.chars().count(),
            fragments_considered,
            fragments_dropped: fragments_considered - prompts.len(),
            prompt_count: prompts.len(),
            total_estimated_tokens: prompts.iter().map(|p| p.estimated_tokens()).sum(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        debug!(
            "Extraction: {} fragments, {} dropped, {} prompts",
            summary.fragments_considered, summary.fragments_dropped, summary.prompt_count
        );

        ExtractionOutcome { prompts, summary }
    }

    /// Extract prompts after charging the input against the
    /// `batch_extraction_chars` quota.
    ///
    /// Usage is checked before extraction and recorded after it. Only the
    /// characters that are actually processed are charged; whitespace-only
    /// input consumes nothing.
    pub fn extract_metered<M>(
        &self,
        text: &str,
        meter: &mut M,
    ) -> Result<Vec<ExtractedPrompt>, ExtractorError>
    where
        M: UsageMeter,
        M::Error: std::error::Error + Send + Sync + 'static,
    {
        let quota = QuotaType::BatchExtractionChars;
        let amount = self.billable_chars(text);

        if amount == 0 {
            return Ok(Vec::new());
        }

        let allowed = meter
            .check_usage_limit(quota, amount)
            .map_err(|e| ExtractorError::Meter(Box::new(e)))?;
        if !allowed {
            warn!("Extraction of {} chars refused by {} quota", amount, quota);
            return Err(ExtractorError::QuotaExceeded {
                quota,
                requested: amount,
            });
        }

        let prompts = self.extract(text);

        meter
            .increment_usage(quota, amount)
            .map_err(|e| ExtractorError::Meter(Box::new(e)))?;

        info!("Extracted {} prompts from {} chars", prompts.len(), amount);
        Ok(prompts)
    }

    /// Token estimate using the configured characters per token
    pub fn estimate_tokens(&self, content: &str) -> usize {
        content
            .chars()
            .count()
            .div_ceil(self.config.chars_per_token.max(1))
    }

    /// Characters of `text` that extraction would process, surrounding
    /// whitespace excluded
    pub fn billable_chars(&self, text: &str) -> u64 {
        self.bounded(text).trim().chars().count() as u64
    }

    /// Cut the input at `max_input_chars`, on a char boundary, when a cap is set
    fn bounded<'a>(&self, text: &'a str) -> &'a str {
        let Some(max_input_chars) = self.config.max_input_chars else {
            return text;
        };

        match text.char_indices().nth(max_input_chars) {
            Some((idx, _)) => {
                warn!(
                    "Input exceeds {} chars, ignoring the remainder",
                    max_input_chars
                );
                &text[..idx]
            }
            None => text,
        }
    }
}
