// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Each error says what went wrong (message), why it might have happened
//! (context) and how to fix it (suggestions).

use std::fmt;
use wh_core::{LockHeldError, LockOwner, LockRecord};

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct WhError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl WhError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

impl fmt::Display for WhError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for WhError {}

/// Common error builders for typical failure scenarios.
impl WhError {
    /// Another process holds the write lock
    pub fn lock_held(held: &LockHeldError) -> Self {
        WhError::new(format!("The database is {}", held))
            .with_context(format!(
                "Last heartbeat at {}",
                held.last_heartbeat_at.format("%Y-%m-%d %H:%M:%S UTC")
            ))
            .with_context("Only one person can make changes at a time")
            .with_suggestion("Wait for the other user to finish, then retry")
            .with_suggestion("Check the lock: wh lock status")
            .with_suggestion(
                "If that process has crashed, remove the lock: wh lock release --force",
            )
    }

    /// The write lock was taken away while this process held it
    pub fn lock_lost(owner: &LockOwner) -> Self {
        WhError::new(format!("Write lock held by {} was lost", owner))
            .with_context("The lock record was removed or taken over by another process")
            .with_context("Changes made from now on may conflict with another writer")
            .with_suggestion("Stop editing and exit now")
            .with_suggestion("Check who holds the lock: wh lock status")
    }

    /// A forced release needs explicit confirmation
    pub fn confirm_force_release(record: &LockRecord, stale: bool) -> Self {
        let mut err = WhError::new(format!("Not released: lock held by {}", record.owner()))
            .with_context("Removing a live lock lets two people write at the same time");
        if !stale {
            err = err.with_context("The holder's heartbeat is recent, so it is probably still running");
        }
        err.with_suggestion("Confirm the holder is gone, then run: wh lock release --force --yes")
    }

    pub fn employee_not_found(id: i64) -> Self {
        WhError::new(format!("Employee {} not found", id))
            .with_context("The employee may have been removed")
            .with_suggestion("List employees: wh employee list --all")
    }
}
