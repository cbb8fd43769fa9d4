// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Urgency tiers and the thresholds that define them

use serde::{Deserialize, Serialize};
use std::fmt;

/// How soon a record needs attention, most urgent first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Critical,
    Warning,
    Info,
    Ok,
}

impl UrgencyTier {
    pub const ALL: [UrgencyTier; 4] = [
        UrgencyTier::Critical,
        UrgencyTier::Warning,
        UrgencyTier::Info,
        UrgencyTier::Ok,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            UrgencyTier::Critical => "CRITICAL",
            UrgencyTier::Warning => "WARNING",
            UrgencyTier::Info => "INFO",
            UrgencyTier::Ok => "OK",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Day counts where each tier begins
///
/// Each bound is inclusive on the less urgent side: with the defaults, 29 days
/// is critical, 30 is a warning, 60 is info and 90 is ok.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub critical_days: i64,
    pub warning_days: i64,
    pub info_days: i64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical_days: 30,
            warning_days: 60,
            info_days: 90,
        }
    }
}

impl AlertThresholds {
    pub fn new(critical_days: i64, warning_days: i64, info_days: i64) -> Self {
        Self {
            critical_days,
            warning_days,
            info_days,
        }
    }

    pub fn tier_for(&self, days_remaining: i64) -> UrgencyTier {
        if days_remaining < self.critical_days {
            UrgencyTier::Critical
        } else if days_remaining < self.warning_days {
            UrgencyTier::Warning
        } else if days_remaining < self.info_days {
            UrgencyTier::Info
        } else {
            UrgencyTier::Ok
        }
    }

    /// Thresholds must be non-negative and strictly ascending
    pub fn check(&self) -> Result<(), String> {
        if self.critical_days < 0 {
            return Err(format!(
                "alerts.critical_days must not be negative (got {})",
                self.critical_days
            ));
        }
        if !(self.critical_days < self.warning_days && self.warning_days < self.info_days) {
            return Err(format!(
                "alert thresholds must be ascending: critical_days ({}) < warning_days ({}) < info_days ({})",
                self.critical_days, self.warning_days, self.info_days
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "urgency_tests.rs"]
mod tests;
