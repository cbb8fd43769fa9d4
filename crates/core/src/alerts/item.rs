// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert inputs and outputs

use super::urgency::UrgencyTier;
use crate::records::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored record with an expiration date the engine can classify
pub trait Expiring {
    /// Employee the record belongs to
    fn subject_id(&self) -> i64;
    fn category(&self) -> Category;
    fn description(&self) -> String;
    /// `None` when the stored date is missing or unreadable
    fn expiration_date(&self) -> Option<NaiveDate>;
}

/// Category-agnostic record as fetched from the data store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedRecord {
    pub subject_id: i64,
    pub category: Category,
    pub description: String,
    pub expiration_date: Option<NaiveDate>,
}

impl TrackedRecord {
    pub fn new(
        subject_id: i64,
        category: Category,
        description: impl Into<String>,
        expiration_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            subject_id,
            category,
            description: description.into(),
            expiration_date,
        }
    }
}

impl Expiring for TrackedRecord {
    fn subject_id(&self) -> i64 {
        self.subject_id
    }

    fn category(&self) -> Category {
        self.category
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }
}

/// A classified record; recomputed on every query, never stored
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlertItem {
    pub subject_id: i64,
    pub category: Category,
    pub description: String,
    pub expiration_date: NaiveDate,
    /// Negative once expired
    pub days_remaining: i64,
    pub urgency: UrgencyTier,
}
