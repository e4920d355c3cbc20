//! In-memory usage accounting

use crate::error::QueueError;
use promptflow_domain::traits::UsageMeter;
use promptflow_domain::QuotaType;
use std::collections::HashMap;
use tracing::debug;

/// Usage counters with optional per-quota limits
///
/// A quota without a limit is unlimited.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUsageMeter {
    limits: HashMap<QuotaType, u64>,
    used: HashMap<QuotaType, u64>,
}

impl InMemoryUsageMeter {
    /// Create a meter with no limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a limit for a quota
    pub fn with_limit(mut self, quota: QuotaType, limit: u64) -> Self {
        self.limits.insert(quota, limit);
        self
    }

    /// Amount consumed so far
    pub fn usage(&self, quota: QuotaType) -> u64 {
        self.used.get(&quota).copied().unwrap_or(0)
    }

    /// Configured limit, if any
    pub fn limit(&self, quota: QuotaType) -> Option<u64> {
        self.limits.get(&quota).copied()
    }

    /// Amount left before the limit; `None` when unlimited
    pub fn remaining(&self, quota: QuotaType) -> Option<u64> {
        self.limit(quota)
            .map(|limit| limit.saturating_sub(self.usage(quota)))
    }

    /// Zero the counter for a quota
    pub fn reset(&mut self, quota: QuotaType) {
        self.used.remove(&quota);
    }
}

impl UsageMeter for InMemoryUsageMeter {
    type Error = QueueError;

    fn check_usage_limit(&self, quota: QuotaType, amount: u64) -> Result<bool, Self::Error> {
        Ok(self
            .remaining(quota)
            .is_none_or(|remaining| amount <= remaining))
    }

    fn increment_usage(&mut self, quota: QuotaType, amount: u64) -> Result<(), Self::Error> {
        let used = self.usage(quota);
        if let Some(limit) = self.limit(quota) {
            if used.saturating_add(amount) > limit {
                return Err(QueueError::LimitReached {
                    quota,
                    used,
                    limit,
                    requested: amount,
                });
            }
        }

        self.used.insert(quota, used.saturating_add(amount));
        debug!("Usage for {}: {}", quota, used.saturating_add(amount));
        Ok(())
    }
}
