// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-writer lock over a shared store
//!
//! One process at a time may write. The holder keeps a heartbeat on the lock
//! record; a record whose heartbeat is older than the stale timeout may be
//! reclaimed by the next process that asks for it.

mod config;
mod heartbeat;
mod manager;
mod memory;
mod record;
mod store;

pub use config::{LockConfig, RetryPolicy};
pub use heartbeat::StopSignal;
pub use manager::{LockError, LockGuard, LockHeldError, LockManager, LockStatus};
pub use memory::MemoryLockStore;
pub use record::{LockOwner, LockRecord};
pub use store::{AcquireOutcome, LockStore, StoreError};
