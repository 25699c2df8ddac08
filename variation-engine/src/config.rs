//! Engine timing configuration
//!
//! The marketplace applies tier-structure edits asynchronously. After
//! appending an option the engine waits a settle delay, then retries model
//! creation a bounded number of times while the new index is still unknown.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Observed propagation delay of a structural edit
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;
/// Delay between create-model attempts
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1000;
/// Create-model attempts, including the first
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// How the delay grows between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffStrategy {
    /// Same delay before every retry
    #[default]
    Fixed,
    /// Delay doubles after every failed attempt
    Exponential,
}

impl FromStr for BackoffStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "exponential" => Ok(Self::Exponential),
            other => Err(format!("unknown backoff strategy: {other}")),
        }
    }
}

/// Bounded retry for the "index not recognized yet" failure class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
    pub strategy: BackoffStrategy,
}

impl RetryPolicy {
    /// Wait before the attempt following `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.strategy {
            BackoffStrategy::Fixed => self.backoff,
            BackoffStrategy::Exponential => {
                let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
                self.backoff.saturating_mul(factor)
            }
        }
    }

    /// At least one attempt is always made
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            strategy: BackoffStrategy::Fixed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Wait after appending an option, before the first create attempt
    pub settle_delay: Duration,
    pub retry: RetryPolicy,
    /// Tier edited by model creation when the request names none
    pub target_tier: usize,
}

impl EngineConfig {
    /// No settle delay and no backoff; retry budget unchanged
    pub fn without_delays() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            retry: RetryPolicy {
                backoff: Duration::ZERO,
                ..RetryPolicy::default()
            },
            ..Self::default()
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_target_tier(mut self, tier: usize) -> Self {
        self.target_tier = tier;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            retry: RetryPolicy::default(),
            target_tier: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_observed_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.settle_delay, Duration::from_secs(1));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.backoff, Duration::from_secs(1));
        assert_eq!(config.retry.strategy, BackoffStrategy::Fixed);
        assert_eq!(config.target_tier, 0);
    }

    #[test]
    fn test_fixed_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_secs(1));
        assert_eq!(policy.delay_after(2), Duration::from_secs(1));
    }

    #[test]
    fn test_exponential_backoff() {
        let policy = RetryPolicy {
            max_attempts: 5,
            backoff: Duration::from_millis(250),
            strategy: BackoffStrategy::Exponential,
        };
        assert_eq!(policy.delay_after(1), Duration::from_millis(250));
        assert_eq!(policy.delay_after(2), Duration::from_millis(500));
        assert_eq!(policy.delay_after(3), Duration::from_millis(1000));
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.attempts(), 1);
    }

    #[test]
    fn test_backoff_strategy_from_str() {
        assert_eq!("fixed".parse(), Ok(BackoffStrategy::Fixed));
        assert_eq!(" Exponential ".parse(), Ok(BackoffStrategy::Exponential));
        assert!("linear".parse::<BackoffStrategy>().is_err());
    }

    #[test]
    fn test_without_delays_keeps_budget() {
        let config = EngineConfig::without_delays();
        assert_eq!(config.settle_delay, Duration::ZERO);
        assert_eq!(config.retry.backoff, Duration::ZERO);
        assert_eq!(config.retry.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }
}
