// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Employee record model
//!
//! Plain values shared by the data store and the alert engine. Each tracked
//! record type knows its default validity, so a missing expiration date can be
//! derived when a record is entered.

use crate::alerts::Expiring;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rejected record input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("expiration date {expires_on} is before {starts_on}")]
    ExpiresBeforeStart {
        starts_on: NaiveDate,
        expires_on: NaiveDate,
    },
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    Unknown {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("date out of range")]
    DateOutOfRange,
}

/// Kind of tracked record
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Caces,
    MedicalVisit,
    Training,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Caces, Category::MedicalVisit, Category::Training];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Caces => "caces",
            Category::MedicalVisit => "medical-visit",
            Category::Training => "training",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "caces" => Ok(Category::Caces),
            "medical-visit" | "medical_visit" | "visit" => Ok(Category::MedicalVisit),
            "training" => Ok(Category::Training),
            _ => Err(RecordError::Unknown {
                kind: "category",
                value: s.to_string(),
                expected: "caces, medical-visit, training",
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub hired_on: Option<NaiveDate>,
    pub active: bool,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub hired_on: Option<NaiveDate>,
}

impl NewEmployee {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            hired_on: None,
        }
    }

    pub fn hired_on(mut self, date: NaiveDate) -> Self {
        self.hired_on = Some(date);
        self
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        if self.first_name.trim().is_empty() {
            return Err(RecordError::Empty("first name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(RecordError::Empty("last name"));
        }
        Ok(())
    }
}

/// CACES (forklift and lifting equipment) certificate families
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacesKind {
    R482,
    R484,
    R485,
    R486,
    R489,
    R490,
}

impl CacesKind {
    pub const ALL: [CacesKind; 6] = [
        CacesKind::R482,
        CacesKind::R484,
        CacesKind::R485,
        CacesKind::R486,
        CacesKind::R489,
        CacesKind::R490,
    ];

    /// Regulatory validity of a certificate of this kind
    pub fn validity_years(&self) -> u32 {
        match self {
            CacesKind::R482 => 10,
            _ => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacesKind::R482 => "R482",
            CacesKind::R484 => "R484",
            CacesKind::R485 => "R485",
            CacesKind::R486 => "R486",
            CacesKind::R489 => "R489",
            CacesKind::R490 => "R490",
        }
    }
}

impl fmt::Display for CacesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacesKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        CacesKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| RecordError::Unknown {
                kind: "CACES kind",
                value: s.to_string(),
                expected: "R482, R484, R485, R486, R489, R490",
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub id: i64,
    pub employee_id: i64,
    pub kind: CacesKind,
    pub obtained_on: NaiveDate,
    pub expires_on: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCertification {
    pub employee_id: i64,
    pub kind: CacesKind,
    pub obtained_on: NaiveDate,
    pub expires_on: Option<NaiveDate>,
}

impl NewCertification {
    /// Explicit expiration, else `obtained_on` plus the kind's validity
    pub fn effective_expiration(&self) -> Result<NaiveDate, RecordError> {
        match self.expires_on {
            Some(date) => Ok(date),
            None => add_years(self.obtained_on, self.kind.validity_years()),
        }
    }

    pub fn validate(&self) -> Result<NaiveDate, RecordError> {
        let expires_on = self.effective_expiration()?;
        check_order(self.obtained_on, expires_on)?;
        Ok(expires_on)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitKind {
    Initial,
    Periodic,
    /// Return-to-work visit after a long absence
    Recovery,
}

impl VisitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitKind::Initial => "initial",
            VisitKind::Periodic => "periodic",
            VisitKind::Recovery => "recovery",
        }
    }
}

impl fmt::Display for VisitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "initial" => Ok(VisitKind::Initial),
            "periodic" => Ok(VisitKind::Periodic),
            "recovery" => Ok(VisitKind::Recovery),
            _ => Err(RecordError::Unknown {
                kind: "visit kind",
                value: s.to_string(),
                expected: "initial, periodic, recovery",
            }),
        }
    }
}

/// Outcome of a medical fitness visit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fitness {
    Fit,
    FitWithRestrictions,
    Unfit,
}

impl Fitness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fitness::Fit => "fit",
            Fitness::FitWithRestrictions => "fit-with-restrictions",
            Fitness::Unfit => "unfit",
        }
    }
}

impl fmt::Display for Fitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fitness {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fit" => Ok(Fitness::Fit),
            "fit-with-restrictions" | "restricted" => Ok(Fitness::FitWithRestrictions),
            "unfit" => Ok(Fitness::Unfit),
            _ => Err(RecordError::Unknown {
                kind: "fitness result",
                value: s.to_string(),
                expected: "fit, fit-with-restrictions, unfit",
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalVisit {
    pub id: i64,
    pub employee_id: i64,
    pub visit_kind: VisitKind,
    pub visited_on: NaiveDate,
    pub fitness: Fitness,
    pub expires_on: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMedicalVisit {
    pub employee_id: i64,
    pub visit_kind: VisitKind,
    pub visited_on: NaiveDate,
    pub fitness: Fitness,
    pub expires_on: Option<NaiveDate>,
}

/// Periodic visits are due again two years later
const PERIODIC_VISIT_YEARS: u32 = 2;

impl NewMedicalVisit {
    /// Explicit expiration; periodic visits default to two years, others to none
    pub fn effective_expiration(&self) -> Result<Option<NaiveDate>, RecordError> {
        match (self.expires_on, self.visit_kind) {
            (Some(date), _) => Ok(Some(date)),
            (None, VisitKind::Periodic) => {
                add_years(self.visited_on, PERIODIC_VISIT_YEARS).map(Some)
            }
            (None, _) => Ok(None),
        }
    }

    pub fn validate(&self) -> Result<Option<NaiveDate>, RecordError> {
        let expires_on = self.effective_expiration()?;
        if let Some(expires_on) = expires_on {
            check_order(self.visited_on, expires_on)?;
        }
        Ok(expires_on)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    pub id: i64,
    pub employee_id: i64,
    pub title: String,
    pub completed_on: NaiveDate,
    /// `None` means the training never expires
    pub expires_on: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTraining {
    pub employee_id: i64,
    pub title: String,
    pub completed_on: NaiveDate,
    pub expires_on: Option<NaiveDate>,
}

impl NewTraining {
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.title.trim().is_empty() {
            return Err(RecordError::Empty("training title"));
        }
        if let Some(expires_on) = self.expires_on {
            check_order(self.completed_on, expires_on)?;
        }
        Ok(())
    }
}

impl Expiring for Certification {
    fn subject_id(&self) -> i64 {
        self.employee_id
    }

    fn category(&self) -> Category {
        Category::Caces
    }

    fn description(&self) -> String {
        format!("CACES {}", self.kind)
    }

    fn expiration_date(&self) -> Option<NaiveDate> {
        self.expires_on
    }
}

impl Expiring for MedicalVisit {
    fn subject_id(&self) -> i64 {
        self.employee_id
    }

    fn category(&self) -> Category {
        Category::MedicalVisit
    }

    fn description(&self) -> String {
        format!("Medical visit ({})", self.visit_kind)
    }

    fn expiration_date(&self) -> Option<NaiveDate> {
        self.expires_on
    }
}

impl Expiring for Training {
    fn subject_id(&self) -> i64 {
        self.employee_id
    }

    fn category(&self) -> Category {
        Category::Training
    }

    fn description(&self) -> String {
        self.title.clone()
    }

    fn expiration_date(&self) -> Option<NaiveDate> {
        self.expires_on
    }
}

/// `date` plus whole years; Feb 29 falls back to Feb 28
pub fn add_years(date: NaiveDate, years: u32) -> Result<NaiveDate, RecordError> {
    date.checked_add_months(Months::new(years * 12))
        .ok_or(RecordError::DateOutOfRange)
}

fn check_order(starts_on: NaiveDate, expires_on: NaiveDate) -> Result<(), RecordError> {
    if expires_on < starts_on {
        return Err(RecordError::ExpiresBeforeStart {
            starts_on,
            expires_on,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
