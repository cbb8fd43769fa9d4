// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process lock store
//!
//! A mutex-guarded singleton that satisfies the [`LockStore`] contract within one
//! process. Used by tests and by single-machine setups with no shared database.

use super::record::{LockOwner, LockRecord};
use super::store::{AcquireOutcome, LockStore, StoreError};
use crate::clock::{Clock, SystemClock};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub struct MemoryLockStore<C: Clock = SystemClock> {
    clock: C,
    slot: Mutex<Option<LockRecord>>,
    /// Renewals that should fail with a transient error before succeeding again
    failing_renewals: AtomicU32,
    renewals: AtomicU64,
}

impl MemoryLockStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryLockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryLockStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            slot: Mutex::new(None),
            failing_renewals: AtomicU32::new(0),
            renewals: AtomicU64::new(0),
        }
    }

    /// Make the next `count` heartbeat renewals fail with [`StoreError::Busy`]
    pub fn fail_next_renewals(&self, count: u32) {
        self.failing_renewals.store(count, Ordering::SeqCst);
    }

    /// Number of successful heartbeat renewals so far
    pub fn renewal_count(&self) -> u64 {
        self.renewals.load(Ordering::SeqCst)
    }

    /// Overwrite the stored record, bypassing ownership checks
    pub fn put(&self, record: Option<LockRecord>) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = record;
    }

    fn take_injected_failure(&self) -> bool {
        self.failing_renewals
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl<C: Clock> LockStore for MemoryLockStore<C> {
    fn try_acquire(
        &self,
        owner: &LockOwner,
        timeout: Duration,
    ) -> Result<AcquireOutcome, StoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        let now = self.clock.now();

        let reclaimed = match slot.take() {
            None => None,
            Some(mut current) if current.is_owned_by(owner) => {
                current.renew(now);
                *slot = Some(current.clone());
                return Ok(AcquireOutcome::Acquired {
                    record: current,
                    reclaimed: None,
                });
            }
            Some(current) if current.is_stale(now, timeout) => Some(current),
            Some(current) => {
                let held = current.clone();
                *slot = Some(current);
                return Ok(AcquireOutcome::AlreadyLocked(held));
            }
        };

        let record = LockRecord::new(owner, now);
        *slot = Some(record.clone());
        Ok(AcquireOutcome::Acquired { record, reclaimed })
    }

    fn renew_heartbeat(&self, host: &str, pid: u32) -> Result<bool, StoreError> {
        if self.take_injected_failure() {
            return Err(StoreError::Busy("injected renewal failure".to_string()));
        }

        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        match slot.as_mut() {
            Some(record) if record.is_held_by(host, pid) => {
                record.renew(self.clock.now());
                self.renewals.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn release(&self, host: &str, pid: u32) -> Result<bool, StoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        match slot.as_ref() {
            Some(record) if record.is_held_by(host, pid) => {
                *slot = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn read_active(&self) -> Result<Option<LockRecord>, StoreError> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn force_release(&self) -> Result<Option<LockRecord>, StoreError> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).take())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
