// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-lock manager
//!
//! Gates exclusive write access for this process against a shared [`LockStore`]
//! and keeps the lock alive with a background heartbeat while it is held.
//!
//! Lifecycle: `Unacquired -> Held -> (Lost) -> Released`, and a released
//! manager can acquire again.

use super::config::LockConfig;
use super::heartbeat::{HeartbeatWorker, StopSignal};
use super::record::{LockOwner, LockRecord};
use super::store::{AcquireOutcome, LockStore, StoreError};
use crate::clock::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Another identity holds a live write lock
#[derive(Clone, Debug)]
pub struct LockHeldError {
    pub owner: LockOwner,
    pub acquired_at: DateTime<Utc>,
    pub last_heartbeat_at: DateTime<Utc>,
    /// Time since the holder acquired the lock, truncated to seconds
    pub age: Duration,
}

impl fmt::Display for LockHeldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "locked by {} since {} ({} ago)",
            self.owner,
            self.acquired_at.format("%Y-%m-%d %H:%M:%S UTC"),
            humantime::format_duration(self.age)
        )
    }
}

impl std::error::Error for LockHeldError {}

/// Errors returned by [`LockManager::acquire`]
#[derive(Debug, Error)]
pub enum LockError {
    #[error(transparent)]
    Held(#[from] LockHeldError),
    #[error("lock store error: {0}")]
    Store(#[from] StoreError),
    #[error("failed to start heartbeat thread: {0}")]
    Heartbeat(#[source] std::io::Error),
}

/// Observable manager state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LockStatus {
    Unacquired,
    Held,
    /// The heartbeat found the lock gone; `release` or `acquire` clears this
    Lost,
    Released,
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LockStatus::Unacquired => "unacquired",
            LockStatus::Held => "held",
            LockStatus::Lost => "lost",
            LockStatus::Released => "released",
        };
        write!(f, "{}", s)
    }
}

/// A running heartbeat thread
struct Heartbeat {
    stop: Arc<StopSignal>,
    done: mpsc::Receiver<()>,
    handle: JoinHandle<()>,
}

pub struct LockManager<S: LockStore, C: Clock = SystemClock> {
    store: Arc<S>,
    clock: C,
    owner: LockOwner,
    config: LockConfig,
    /// Serializes acquire/release within the process and owns the heartbeat thread
    heartbeat: Mutex<Option<Heartbeat>>,
    held: AtomicBool,
    released: AtomicBool,
    lost: Arc<AtomicBool>,
}

impl<S: LockStore> LockManager<S> {
    pub fn new(store: Arc<S>, owner: LockOwner, config: LockConfig) -> Self {
        Self::with_clock(store, owner, config, SystemClock)
    }
}

impl<S: LockStore, C: Clock> LockManager<S, C> {
    pub fn with_clock(store: Arc<S>, owner: LockOwner, config: LockConfig, clock: C) -> Self {
        Self {
            store,
            clock,
            owner,
            config,
            heartbeat: Mutex::new(None),
            held: AtomicBool::new(false),
            released: AtomicBool::new(false),
            lost: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn owner(&self) -> &LockOwner {
        &self.owner
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Take the write lock and start the heartbeat.
    ///
    /// Contention is reported, never retried here. Calling this while the lock
    /// is already held renews the heartbeat without a second heartbeat thread.
    pub fn acquire(&self) -> Result<LockRecord, LockError> {
        let mut slot = self.heartbeat.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(heartbeat) = slot.take() {
            if self.lost.load(Ordering::Acquire) {
                self.stop_heartbeat(heartbeat);
                self.held.store(false, Ordering::Release);
                self.lost.store(false, Ordering::Release);
                self.released.store(true, Ordering::Release);
            } else {
                *slot = Some(heartbeat);
                return self.refresh();
            }
        }

        let outcome = self.store.try_acquire(&self.owner, self.config.stale_timeout)?;
        let (record, reclaimed) = match outcome {
            AcquireOutcome::Acquired { record, reclaimed } => (record, reclaimed),
            AcquireOutcome::AlreadyLocked(current) => {
                let err = self.held_error(&current);
                info!(holder = %err.owner, age_secs = err.age.as_secs(), "write lock is held elsewhere");
                return Err(err.into());
            }
        };

        if let Some(previous) = reclaimed {
            warn!(
                previous = %previous.owner(),
                heartbeat_age_secs = previous.heartbeat_age(self.clock.now()).as_secs(),
                "reclaimed stale write lock"
            );
        }

        self.lost.store(false, Ordering::Release);
        match self.spawn_heartbeat() {
            Ok(heartbeat) => *slot = Some(heartbeat),
            Err(err) => {
                error!(error = %err, "could not start heartbeat, giving the lock back");
                if let Err(release_err) = self.store.release(&self.owner.host, self.owner.pid) {
                    error!(error = %release_err, "failed to give back write lock");
                }
                return Err(LockError::Heartbeat(err));
            }
        }
        self.held.store(true, Ordering::Release);
        self.released.store(false, Ordering::Release);

        info!(owner = %self.owner, "write lock acquired");
        Ok(record)
    }

    /// Stop the heartbeat and delete the lock record.
    ///
    /// Returns `false`, without error, when nothing was held or the record was
    /// no longer ours. Safe to call repeatedly and from cleanup paths.
    pub fn release(&self) -> bool {
        let mut slot = self.heartbeat.lock().unwrap_or_else(|e| e.into_inner());
        let Some(heartbeat) = slot.take() else {
            debug!("release requested without a held write lock");
            return false;
        };

        self.stop_heartbeat(heartbeat);
        let was_lost = self.lost.swap(false, Ordering::AcqRel);
        self.held.store(false, Ordering::Release);
        self.released.store(true, Ordering::Release);

        match self.store.release(&self.owner.host, self.owner.pid) {
            Ok(true) => {
                info!(owner = %self.owner, "write lock released");
                true
            }
            Ok(false) if was_lost => {
                info!(owner = %self.owner, "released a write lock that had already been lost");
                false
            }
            Ok(false) => {
                warn!(owner = %self.owner, "write lock record was not ours at release");
                false
            }
            Err(err) => {
                error!(owner = %self.owner, error = %err, "failed to delete write lock record");
                false
            }
        }
    }

    /// True only while held and no loss has been detected
    pub fn has_lock(&self) -> bool {
        self.held.load(Ordering::Acquire) && !self.lost.load(Ordering::Acquire)
    }

    pub fn status(&self) -> LockStatus {
        if self.held.load(Ordering::Acquire) {
            if self.lost.load(Ordering::Acquire) {
                LockStatus::Lost
            } else {
                LockStatus::Held
            }
        } else if self.released.load(Ordering::Acquire) {
            LockStatus::Released
        } else {
            LockStatus::Unacquired
        }
    }

    /// Confirm, with a fresh read of the store, that the lock is still ours.
    ///
    /// Diagnostic only: never changes manager state.
    pub fn check_lock_health(&self) -> bool {
        if !self.has_lock() {
            return false;
        }
        match self.store.read_active() {
            Ok(Some(record)) if record.is_owned_by(&self.owner) => true,
            Ok(Some(record)) => {
                warn!(owner = %self.owner, holder = %record.owner(), "write lock now names another holder");
                false
            }
            Ok(None) => {
                warn!(owner = %self.owner, "write lock record has disappeared");
                false
            }
            Err(err) => {
                warn!(error = %err, "lock health check could not read the store");
                false
            }
        }
    }

    /// Acquire and return a guard that releases on every exit path
    pub fn acquire_scoped(&self) -> Result<LockGuard<'_, S, C>, LockError> {
        let record = self.acquire()?;
        Ok(LockGuard {
            manager: self,
            record,
            active: true,
        })
    }

    /// Run `f` while holding the write lock
    pub fn with_lock<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&LockRecord) -> Result<T, E>,
        E: From<LockError>,
    {
        let guard = self.acquire_scoped()?;
        f(guard.record())
    }

    fn refresh(&self) -> Result<LockRecord, LockError> {
        match self.store.try_acquire(&self.owner, self.config.stale_timeout)? {
            AcquireOutcome::Acquired { record, .. } => Ok(record),
            AcquireOutcome::AlreadyLocked(current) => Err(self.held_error(&current).into()),
        }
    }

    fn held_error(&self, current: &LockRecord) -> LockHeldError {
        let age = current.age(self.clock.now());
        LockHeldError {
            owner: current.owner(),
            acquired_at: current.acquired_at,
            last_heartbeat_at: current.last_heartbeat_at,
            age: Duration::from_secs(age.as_secs()),
        }
    }

    fn spawn_heartbeat(&self) -> std::io::Result<Heartbeat> {
        let stop = Arc::new(StopSignal::new());
        let (done_tx, done_rx) = mpsc::channel();
        let worker = HeartbeatWorker {
            store: Arc::clone(&self.store),
            owner: self.owner.clone(),
            config: self.config.clone(),
            stop: Arc::clone(&stop),
            lost: Arc::clone(&self.lost),
        };
        let handle = std::thread::Builder::new()
            .name("wh-heartbeat".to_string())
            .spawn(move || worker.run(done_tx))?;
        Ok(Heartbeat {
            stop,
            done: done_rx,
            handle,
        })
    }

    fn stop_heartbeat(&self, heartbeat: Heartbeat) {
        heartbeat.stop.stop();
        match heartbeat.done.recv_timeout(self.config.release_grace) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if heartbeat.handle.join().is_err() {
                    error!("heartbeat thread panicked");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                error!(
                    grace_ms = self.config.release_grace.as_millis() as u64,
                    "heartbeat thread did not stop within the grace period, detaching it"
                );
            }
        }
    }
}

impl<S: LockStore, C: Clock> Drop for LockManager<S, C> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Holds the write lock until dropped or explicitly released
#[must_use = "the write lock is released as soon as the guard is dropped"]
pub struct LockGuard<'a, S: LockStore, C: Clock = SystemClock> {
    manager: &'a LockManager<S, C>,
    record: LockRecord,
    active: bool,
}

impl<S: LockStore, C: Clock> LockGuard<'_, S, C> {
    /// The record as it was when the lock was acquired
    pub fn record(&self) -> &LockRecord {
        &self.record
    }

    pub fn is_healthy(&self) -> bool {
        self.manager.check_lock_health()
    }

    pub fn release(mut self) -> bool {
        self.active = false;
        self.manager.release()
    }
}

impl<S: LockStore, C: Clock> Drop for LockGuard<'_, S, C> {
    fn drop(&mut self) {
        if self.active {
            self.manager.release();
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
