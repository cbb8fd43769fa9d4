// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock ownership identity and the persisted lock record

use crate::clock::elapsed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identity of a process that may hold the write lock
///
/// Ownership is decided by `(host, pid)`; the user name is carried for display.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockOwner {
    pub host: String,
    pub user: Option<String>,
    pub pid: u32,
}

impl LockOwner {
    pub fn new(host: impl Into<String>, pid: u32) -> Self {
        Self {
            host: host.into(),
            user: None,
            pid,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Identity of the running process
    pub fn current() -> Self {
        let host = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string());
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .ok()
            .filter(|u| !u.is_empty());
        Self {
            host,
            user,
            pid: std::process::id(),
        }
    }

    pub fn matches(&self, host: &str, pid: u32) -> bool {
        self.host == host && self.pid == pid
    }
}

impl fmt::Display for LockOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.user {
            Some(user) => write!(f, "{}@{} (pid {})", user, self.host, self.pid),
            None => write!(f, "{} (pid {})", self.host, self.pid),
        }
    }
}

/// The singleton record naming the current write-lock holder
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    pub owner_host: String,
    pub owner_user: Option<String>,
    pub owner_process_id: u32,
    pub acquired_at: DateTime<Utc>,
    pub last_heartbeat_at: DateTime<Utc>,
}

impl LockRecord {
    /// Fresh record for `owner`, acquired and heartbeated at `now`
    pub fn new(owner: &LockOwner, now: DateTime<Utc>) -> Self {
        Self {
            owner_host: owner.host.clone(),
            owner_user: owner.user.clone(),
            owner_process_id: owner.pid,
            acquired_at: now,
            last_heartbeat_at: now,
        }
    }

    pub fn owner(&self) -> LockOwner {
        LockOwner {
            host: self.owner_host.clone(),
            user: self.owner_user.clone(),
            pid: self.owner_process_id,
        }
    }

    pub fn is_owned_by(&self, owner: &LockOwner) -> bool {
        self.is_held_by(&owner.host, owner.pid)
    }

    pub fn is_held_by(&self, host: &str, pid: u32) -> bool {
        self.owner_host == host && self.owner_process_id == pid
    }

    /// Time since the lock was acquired
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        elapsed(self.acquired_at, now)
    }

    /// Time since the holder last proved it was alive
    pub fn heartbeat_age(&self, now: DateTime<Utc>) -> Duration {
        elapsed(self.last_heartbeat_at, now)
    }

    pub fn is_stale(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        self.heartbeat_age(now) > timeout
    }

    /// Move the heartbeat forward, never before `acquired_at`
    pub fn renew(&mut self, now: DateTime<Utc>) {
        self.last_heartbeat_at = now.max(self.acquired_at);
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
