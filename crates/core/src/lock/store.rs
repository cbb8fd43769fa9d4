// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage contract for the singleton write-lock record

use super::record::{LockOwner, LockRecord};
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a lock store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store is momentarily contended (e.g. the database is locked by a reader)
    #[error("lock store busy: {0}")]
    Busy(String),
    /// The store could not be reached (e.g. the network share dropped)
    #[error("lock store unavailable: {0}")]
    Unavailable(String),
    /// The stored lock record could not be decoded
    #[error("corrupt lock record: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Whether retrying the same operation shortly could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Busy(_) | StoreError::Unavailable(_))
    }
}

/// Result of an acquisition attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The caller now owns the lock
    Acquired {
        record: LockRecord,
        /// Previous holder whose stale lock was taken over
        reclaimed: Option<LockRecord>,
    },
    /// Another identity holds a live lock
    AlreadyLocked(LockRecord),
}

/// Persistent home of the lock record
///
/// Every operation must be atomic with respect to the others, across threads
/// and across processes sharing the store. Callers never read-modify-write the
/// record themselves.
pub trait LockStore: Send + Sync + 'static {
    /// Create the record for `owner` if none exists or the existing one is stale.
    ///
    /// A record already owned by `(owner.host, owner.pid)` keeps its
    /// `acquired_at`, gets a fresh heartbeat and is reported as acquired.
    fn try_acquire(&self, owner: &LockOwner, timeout: Duration)
        -> Result<AcquireOutcome, StoreError>;

    /// Move the heartbeat forward; `false` when `(host, pid)` no longer owns the lock
    fn renew_heartbeat(&self, host: &str, pid: u32) -> Result<bool, StoreError>;

    /// Delete the record if `(host, pid)` owns it
    fn release(&self, host: &str, pid: u32) -> Result<bool, StoreError>;

    fn read_active(&self) -> Result<Option<LockRecord>, StoreError>;

    /// Delete the record whoever owns it, returning what was removed
    ///
    /// Administrative escape hatch for a lock the user confirmed is abandoned.
    fn force_release(&self) -> Result<Option<LockRecord>, StoreError>;
}
