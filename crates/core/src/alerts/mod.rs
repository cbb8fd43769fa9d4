// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expiration alerts
//!
//! Turns stored expiration dates into urgency-classified, sorted alert lists
//! and per-tier counts.

mod engine;
mod item;
mod summary;
mod urgency;

pub use engine::{AlertEngine, AlertQuery};
pub use item::{AlertItem, Expiring, TrackedRecord};
pub use summary::AlertSummary;
pub use urgency::{AlertThresholds, UrgencyTier};
