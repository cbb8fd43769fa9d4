// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock timing configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Write lock configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// How often the holder refreshes its heartbeat
    #[serde(with = "humantime_serde")]
    pub heartbeat_interval: Duration,
    /// How long without a heartbeat before the lock may be reclaimed
    #[serde(with = "humantime_serde")]
    pub stale_timeout: Duration,
    /// How long `release` waits for the heartbeat thread to exit
    #[serde(with = "humantime_serde")]
    pub release_grace: Duration,
    /// Granularity at which the heartbeat thread checks its stop signal
    #[serde(with = "humantime_serde")]
    pub stop_poll: Duration,
    /// Backoff applied when a renewal hits a storage error
    pub retry: RetryPolicy,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(30),
            stale_timeout: Duration::from_secs(120),
            release_grace: Duration::from_secs(5),
            stop_poll: Duration::from_secs(1),
            retry: RetryPolicy::default(),
        }
    }
}

impl LockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    pub fn with_stale_timeout(mut self, timeout: Duration) -> Self {
        self.stale_timeout = timeout;
        self
    }

    pub fn with_release_grace(mut self, grace: Duration) -> Self {
        self.release_grace = grace;
        self
    }

    pub fn with_stop_poll(mut self, poll: Duration) -> Self {
        self.stop_poll = poll;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Check the timing invariants, returning a description of the first violation
    pub fn check(&self) -> Result<(), String> {
        if self.heartbeat_interval.is_zero() {
            return Err("lock.heartbeat_interval must be greater than zero".to_string());
        }
        if self.stop_poll.is_zero() {
            return Err("lock.stop_poll must be greater than zero".to_string());
        }
        if self.stop_poll >= self.release_grace {
            return Err(format!(
                "lock.release_grace ({}) must be longer than lock.stop_poll ({})",
                humantime::format_duration(self.release_grace),
                humantime::format_duration(self.stop_poll),
            ));
        }
        let minimum = self.heartbeat_interval.saturating_mul(3);
        if self.stale_timeout < minimum {
            return Err(format!(
                "lock.stale_timeout ({}) must be at least 3x lock.heartbeat_interval ({})",
                humantime::format_duration(self.stale_timeout),
                humantime::format_duration(self.heartbeat_interval),
            ));
        }
        Ok(())
    }
}

/// Bounded exponential backoff for heartbeat renewal
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first failed attempt
    pub max_retries: u32,
    #[serde(with = "humantime_serde")]
    pub base_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// Delay before retry number `attempt` (0-based): base * 2^attempt, capped
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_timeout_at_four_intervals() {
        let config = LockConfig::default();
        assert_eq!(config.stale_timeout, config.heartbeat_interval * 4);
        assert!(config.check().is_ok());
    }

    #[test]
    fn timeout_below_three_intervals_is_rejected() {
        let config = LockConfig::new()
            .with_heartbeat_interval(Duration::from_secs(30))
            .with_stale_timeout(Duration::from_secs(60));
        let err = config.check().unwrap_err();
        assert!(err.contains("at least 3x"), "{err}");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = LockConfig::new().with_heartbeat_interval(Duration::ZERO);
        assert!(config.check().is_err());
    }

    #[test]
    fn grace_must_outlast_stop_poll() {
        let equal = LockConfig::new()
            .with_stop_poll(Duration::from_secs(1))
            .with_release_grace(Duration::from_secs(1));
        let err = equal.check().unwrap_err();
        assert!(err.contains("release_grace"), "{err}");

        let zero = LockConfig::new().with_release_grace(Duration::ZERO);
        assert!(zero.check().is_err());
    }

    #[test]
    fn backoff_doubles_then_caps() {
        let retry = RetryPolicy::default();
        assert_eq!(retry.delay_for(0), Duration::from_secs(1));
        assert_eq!(retry.delay_for(1), Duration::from_secs(2));
        assert_eq!(retry.delay_for(2), Duration::from_secs(4));
        assert_eq!(retry.delay_for(3), Duration::from_secs(8));
        assert_eq!(retry.delay_for(4), Duration::from_secs(10));
        assert_eq!(retry.delay_for(40), Duration::from_secs(10));
    }
}
