// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wh-core: core library for the warehouse records (wh) tool
//!
//! This crate provides:
//! - A single-writer lock with a background heartbeat, over any [`LockStore`]
//! - The expiration alert engine classifying records into urgency tiers
//! - The employee record model and application configuration

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod alerts;
pub mod clock;
pub mod config;
pub mod lock;
pub mod records;

pub use alerts::{
    AlertEngine, AlertItem, AlertQuery, AlertSummary, AlertThresholds, Expiring, TrackedRecord,
    UrgencyTier,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{AlertsConfig, AppConfig, ConfigError};
pub use lock::{
    AcquireOutcome, LockConfig, LockError, LockGuard, LockHeldError, LockManager, LockOwner,
    LockRecord, LockStatus, LockStore, MemoryLockStore, RetryPolicy, StoreError,
};
pub use records::{
    CacesKind, Category, Certification, Employee, Fitness, MedicalVisit, NewCertification,
    NewEmployee, NewMedicalVisit, NewTraining, RecordError, Training, VisitKind,
};
