//! Per-process state shared by commands and the REPL.

use crate::config::Config;
use crate::error::{CliError, Result};
use promptflow_domain::{QuotaType, UsageMeter};
use promptflow_extractor::PromptExtractor;
use promptflow_queue::{InMemoryJobQueue, InMemoryUsageMeter};

/// Extractor, usage meter and job queue for one run of the CLI.
///
/// Usage and jobs live only as long as the process.
pub struct Session {
    /// Configured extractor
    pub extractor: PromptExtractor,

    /// Usage counters with the configured limits
    pub meter: InMemoryUsageMeter,

    /// Jobs submitted during this session
    pub queue: InMemoryJobQueue,
}

impl Session {
    /// Build a session from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            extractor: PromptExtractor::try_new(config.extractor.clone())?,
            meter: config.quotas.meter(),
            queue: InMemoryJobQueue::new(),
        })
    }

    /// Fail with a user-facing message when `amount` more of `quota` would
    /// exceed the limit. Nothing is recorded.
    pub fn ensure_within(&self, quota: QuotaType, amount: u64) -> Result<()> {
        if !self.meter.check_usage_limit(quota, amount)? {
            let remaining = self.meter.remaining(quota).unwrap_or(0);
            return Err(CliError::QuotaExceeded(format!(
                "{} needs {}, {} left",
                quota, amount, remaining
            )));
        }
        Ok(())
    }

    /// Charge `amount` of `quota`.
    pub fn charge(&mut self, quota: QuotaType, amount: u64) -> Result<()> {
        self.charge_all(&[(quota, amount)])
    }

    /// Charge several quotas at once: every limit is checked before any
    /// usage is recorded, so a refusal leaves all counters untouched.
    pub fn charge_all(&mut self, charges: &[(QuotaType, u64)]) -> Result<()> {
        for &(quota, amount) in charges {
            self.ensure_within(quota, amount)?;
        }
        for &(quota, amount) in charges {
            self.meter.increment_usage(quota, amount)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_within_and_over_limit() {
        let mut config = Config::default();
        config.quotas.prompt_optimizations = Some(2);
        let mut session = Session::from_config(&config).unwrap();

        session.charge(QuotaType::PromptOptimizations, 2).unwrap();
        let err = session.charge(QuotaType::PromptOptimizations, 1).unwrap_err();
        assert!(matches!(err, CliError::QuotaExceeded(_)));
    }

    #[test]
    fn test_charge_all_is_all_or_nothing() {
        let mut config = Config::default();
        config.quotas.execution_jobs = Some(1);
        let mut session = Session::from_config(&config).unwrap();

        let err = session
            .charge_all(&[
                (QuotaType::BatchExtractionChars, 40),
                (QuotaType::ExecutionJobs, 2),
            ])
            .unwrap_err();

        assert!(matches!(err, CliError::QuotaExceeded(_)));
        assert_eq!(session.meter.usage(QuotaType::BatchExtractionChars), 0);
        assert_eq!(session.meter.usage(QuotaType::ExecutionJobs), 0);

        session
            .charge_all(&[
                (QuotaType::BatchExtractionChars, 40),
                (QuotaType::ExecutionJobs, 1),
            ])
            .unwrap();
        assert_eq!(session.meter.usage(QuotaType::BatchExtractionChars), 40);
    }

    #[test]
    fn test_invalid_extractor_config() {
        let mut config = Config::default();
        config.extractor.chars_per_token = 0;
        assert!(Session::from_config(&config).is_err());
    }
}
