// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background heartbeat keeping a held lock alive
//!
//! The worker talks to its manager only through a [`StopSignal`] and a shared
//! "lost" flag. Storage errors never leave the thread: transient ones are
//! retried with bounded backoff, and fatal ones or exhausted retries turn into
//! the lost flag.

use super::config::LockConfig;
use super::record::LockOwner;
use super::store::{LockStore, StoreError};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Cooperative stop request shared between a manager and its heartbeat thread
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        *self.stopped.lock().unwrap_or_else(|e| e.into_inner()) = true;
        self.wake.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        *self.stopped.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sleep up to `duration`, re-checking the flag at least every `poll`.
    ///
    /// Returns `true` as soon as a stop has been requested.
    pub fn wait(&self, duration: Duration, poll: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let mut stopped = self.stopped.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if *stopped {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let slice = (deadline - now).min(poll);
            let (guard, _) = self
                .wake
                .wait_timeout(stopped, slice)
                .unwrap_or_else(|e| e.into_inner());
            stopped = guard;
        }
    }
}

/// How a renewal round ended
#[derive(Debug)]
enum Renewal {
    Renewed,
    /// The store no longer names us as the holder
    NotOwned,
    /// Every retry failed, or the error cannot be retried
    Exhausted(StoreError),
    Stopped,
}

/// State moved onto the heartbeat thread
pub(crate) struct HeartbeatWorker<S: LockStore> {
    pub(crate) store: Arc<S>,
    pub(crate) owner: LockOwner,
    pub(crate) config: LockConfig,
    pub(crate) stop: Arc<StopSignal>,
    pub(crate) lost: Arc<AtomicBool>,
}

impl<S: LockStore> HeartbeatWorker<S> {
    /// Renew until stopped or until the lock is gone.
    ///
    /// `_done` is dropped when this returns (or unwinds), which is how the
    /// manager learns the thread has finished.
    pub(crate) fn run(self, _done: mpsc::Sender<()>) {
        debug!(owner = %self.owner, "heartbeat started");
        loop {
            if self
                .stop
                .wait(self.config.heartbeat_interval, self.config.stop_poll)
            {
                debug!(owner = %self.owner, "heartbeat stopped");
                return;
            }

            match self.renew() {
                Renewal::Renewed => debug!(owner = %self.owner, "heartbeat renewed"),
                Renewal::Stopped => {
                    debug!(owner = %self.owner, "heartbeat stopped during retry");
                    return;
                }
                Renewal::NotOwned => {
                    warn!(owner = %self.owner, "write lock lost: record no longer names this process");
                    self.lost.store(true, Ordering::Release);
                    return;
                }
                Renewal::Exhausted(err) => {
                    error!(
                        owner = %self.owner,
                        error = %err,
                        retries = self.config.retry.max_retries,
                        "write lock lost: heartbeat renewal failed"
                    );
                    self.lost.store(true, Ordering::Release);
                    return;
                }
            }
        }
    }

    fn renew(&self) -> Renewal {
        let retry = &self.config.retry;
        let mut attempt = 0;
        loop {
            // Checked right before touching the store so a stopped loop never renews
            if self.stop.is_stopped() {
                return Renewal::Stopped;
            }

            let err = match self.try_renew() {
                Ok(true) => return Renewal::Renewed,
                Ok(false) => return Renewal::NotOwned,
                Err(err) => err,
            };

            if !err.is_transient() || attempt >= retry.max_retries {
                return Renewal::Exhausted(err);
            }
            let delay = retry.delay_for(attempt);
            attempt += 1;
            warn!(
                owner = %self.owner,
                error = %err,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "heartbeat renewal failed, retrying"
            );
            if self.stop.wait(delay, self.config.stop_poll) {
                return Renewal::Stopped;
            }
        }
    }

    fn try_renew(&self) -> Result<bool, StoreError> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.store
                .renew_heartbeat(&self.owner.host, self.owner.pid)
        }))
        .unwrap_or_else(|_| {
            Err(StoreError::Unavailable(
                "lock store panicked during renewal".to_string(),
            ))
        })
    }
}

#[cfg(test)]
#[path = "heartbeat_tests.rs"]
mod tests;
