// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::item::AlertItem;
use super::urgency::UrgencyTier;
use serde::Serialize;

/// Counts per urgency tier over a set of alert items
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub ok: usize,
    pub total: usize,
    /// Records skipped because their expiration date could not be read
    pub unevaluable: usize,
}

impl AlertSummary {
    pub fn from_items(items: &[AlertItem]) -> Self {
        let mut summary = Self::default();
        for item in items {
            summary.add(item.urgency);
        }
        summary
    }

    fn add(&mut self, tier: UrgencyTier) {
        match tier {
            UrgencyTier::Critical => self.critical += 1,
            UrgencyTier::Warning => self.warning += 1,
            UrgencyTier::Info => self.info += 1,
            UrgencyTier::Ok => self.ok += 1,
        }
        self.total += 1;
    }

    pub fn count(&self, tier: UrgencyTier) -> usize {
        match tier {
            UrgencyTier::Critical => self.critical,
            UrgencyTier::Warning => self.warning,
            UrgencyTier::Info => self.info,
            UrgencyTier::Ok => self.ok,
        }
    }
}
