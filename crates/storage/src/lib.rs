// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wh-storage: SQLite persistence for the shared database file
//!
//! Both stores open their own connection to the same file: the lock store
//! holds the single write-lock row, the record store holds employees and
//! their tracked records.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

mod error;
mod lock_store;
mod records;
pub mod schema;

pub use error::StorageError;
pub use lock_store::SqliteLockStore;
pub use records::RecordStore;
