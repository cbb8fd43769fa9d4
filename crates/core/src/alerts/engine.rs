// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expiration classification engine
//!
//! Pure computation over records handed in by the caller. The only input from
//! outside is "today", taken from the injected [`Clock`] or passed explicitly.

use super::item::{AlertItem, Expiring};
use super::summary::AlertSummary;
use super::urgency::{AlertThresholds, UrgencyTier};
use crate::clock::{Clock, SystemClock};
use crate::records::Category;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Result of an alert query
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AlertQuery {
    /// Most urgent first
    pub items: Vec<AlertItem>,
    /// Matching records left out because they have no usable expiration date
    pub unevaluable: usize,
}

impl AlertQuery {
    pub fn summary(&self) -> AlertSummary {
        AlertSummary {
            unevaluable: self.unevaluable,
            ..AlertSummary::from_items(&self.items)
        }
    }
}

#[derive(Clone, Debug)]
pub struct AlertEngine<C: Clock = SystemClock> {
    clock: C,
    thresholds: AlertThresholds,
}

impl AlertEngine {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self::with_clock(thresholds, SystemClock)
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new(AlertThresholds::default())
    }
}

impl<C: Clock> AlertEngine<C> {
    pub fn with_clock(thresholds: AlertThresholds, clock: C) -> Self {
        Self { clock, thresholds }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Calendar days from `today` to `expiration_date` and the resulting tier
    pub fn classify(&self, expiration_date: NaiveDate, today: NaiveDate) -> (i64, UrgencyTier) {
        let days_remaining = (expiration_date - today).num_days();
        (days_remaining, self.thresholds.tier_for(days_remaining))
    }

    /// Records expiring within `days_threshold` days of today, most urgent first
    pub fn query_alerts<R: Expiring>(
        &self,
        records: &[R],
        category: Option<Category>,
        days_threshold: i64,
    ) -> AlertQuery {
        self.query_alerts_on(records, category, days_threshold, self.clock.today())
    }

    /// [`query_alerts`](Self::query_alerts) against an explicit date
    pub fn query_alerts_on<R: Expiring>(
        &self,
        records: &[R],
        category: Option<Category>,
        days_threshold: i64,
        today: NaiveDate,
    ) -> AlertQuery {
        let mut query = AlertQuery::default();

        for record in records {
            let record_category = record.category();
            if category.is_some_and(|wanted| wanted != record_category) {
                continue;
            }
            let Some(expiration_date) = record.expiration_date() else {
                query.unevaluable += 1;
                continue;
            };
            let (days_remaining, urgency) = self.classify(expiration_date, today);
            if days_remaining > days_threshold {
                continue;
            }
            query.items.push(AlertItem {
                subject_id: record.subject_id(),
                category: record_category,
                description: record.description(),
                expiration_date,
                days_remaining,
                urgency,
            });
        }

        query.items.sort_by(|a, b| {
            a.days_remaining
                .cmp(&b.days_remaining)
                .then(a.subject_id.cmp(&b.subject_id))
                .then(a.category.cmp(&b.category))
                .then_with(|| a.description.cmp(&b.description))
        });

        if query.unevaluable > 0 {
            debug!(
                unevaluable = query.unevaluable,
                "records without a usable expiration date were skipped"
            );
        }
        query
    }

    pub fn summarize(&self, items: &[AlertItem]) -> AlertSummary {
        AlertSummary::from_items(items)
    }

    /// Most urgent tier per employee across every evaluable record
    pub fn employee_status<R: Expiring>(&self, records: &[R]) -> BTreeMap<i64, UrgencyTier> {
        let today = self.clock.today();
        let mut status = BTreeMap::new();
        for record in records {
            let Some(expiration_date) = record.expiration_date() else {
                continue;
            };
            let (_, tier) = self.classify(expiration_date, today);
            status
                .entry(record.subject_id())
                .and_modify(|worst: &mut UrgencyTier| *worst = (*worst).min(tier))
                .or_insert(tier);
        }
        status
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
