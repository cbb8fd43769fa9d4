// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed lock store
//!
//! The lock is a single row (`id = 1`) in the shared database. Every operation
//! runs inside a `BEGIN IMMEDIATE` transaction, which takes SQLite's reserved
//! lock up front, so check-then-write sequences cannot interleave across
//! processes or hosts.

use crate::error::{store_error, StorageError};
use crate::schema;
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;
use wh_core::{AcquireOutcome, Clock, LockOwner, LockRecord, LockStore, StoreError, SystemClock};

pub struct SqliteLockStore<C: Clock = SystemClock> {
    conn: Mutex<Connection>,
    clock: C,
}

impl SqliteLockStore {
    /// Open the database file, creating the schema if needed
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_with_clock(path, SystemClock)
    }
}

impl<C: Clock> SqliteLockStore<C> {
    pub fn open_with_clock(path: &Path, clock: C) -> Result<Self, StorageError> {
        let conn = schema::open(path)?;
        schema::bootstrap(&conn)?;
        Ok(Self::with_clock(conn, clock))
    }

    /// Wrap an already configured connection with an initialised schema
    pub fn with_clock(conn: Connection, clock: C) -> Self {
        Self {
            conn: Mutex::new(conn),
            clock,
        }
    }

    fn immediate<T>(
        &self,
        op: impl FnOnce(&Transaction<'_>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(store_error)?;
        let value = op(&tx)?;
        tx.commit().map_err(store_error)?;
        Ok(value)
    }
}

impl<C: Clock> LockStore for SqliteLockStore<C> {
    fn try_acquire(
        &self,
        owner: &LockOwner,
        timeout: Duration,
    ) -> Result<AcquireOutcome, StoreError> {
        self.immediate(|tx| {
            // Stored at millisecond precision; keep the returned record identical
            let now = from_ms(to_ms(self.clock.now()))?;
            let reclaimed = match read_row(tx)? {
                None => None,
                Some(mut current) if current.is_owned_by(owner) => {
                    current.renew(now);
                    tx.execute(
                        "UPDATE write_lock SET heartbeat_at_ms = ?1 WHERE id = 1",
                        params![to_ms(current.last_heartbeat_at)],
                    )
                    .map_err(store_error)?;
                    return Ok(AcquireOutcome::Acquired {
                        record: current,
                        reclaimed: None,
                    });
                }
                Some(current) if current.is_stale(now, timeout) => Some(current),
                Some(current) => return Ok(AcquireOutcome::AlreadyLocked(current)),
            };

            let record = LockRecord::new(owner, now);
            tx.execute(
                "INSERT OR REPLACE INTO write_lock
                   (id, owner_host, owner_user, owner_pid, acquired_at_ms, heartbeat_at_ms)
                 VALUES (1, ?1, ?2, ?3, ?4, ?5)",
                params![
                    record.owner_host,
                    record.owner_user,
                    record.owner_process_id,
                    to_ms(record.acquired_at),
                    to_ms(record.last_heartbeat_at),
                ],
            )
            .map_err(store_error)?;
            Ok(AcquireOutcome::Acquired { record, reclaimed })
        })
    }

    fn renew_heartbeat(&self, host: &str, pid: u32) -> Result<bool, StoreError> {
        self.immediate(|tx| {
            let changed = tx
                .execute(
                    "UPDATE write_lock SET heartbeat_at_ms = MAX(?1, acquired_at_ms)
                     WHERE id = 1 AND owner_host = ?2 AND owner_pid = ?3",
                    params![to_ms(self.clock.now()), host, pid],
                )
                .map_err(store_error)?;
            Ok(changed == 1)
        })
    }

    fn release(&self, host: &str, pid: u32) -> Result<bool, StoreError> {
        self.immediate(|tx| {
            let changed = tx
                .execute(
                    "DELETE FROM write_lock WHERE id = 1 AND owner_host = ?1 AND owner_pid = ?2",
                    params![host, pid],
                )
                .map_err(store_error)?;
            Ok(changed == 1)
        })
    }

    fn read_active(&self) -> Result<Option<LockRecord>, StoreError> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        read_row(&conn)
    }

    fn force_release(&self) -> Result<Option<LockRecord>, StoreError> {
        self.immediate(|tx| {
            let removed = read_row(tx)?;
            if removed.is_some() {
                tx.execute("DELETE FROM write_lock WHERE id = 1", [])
                    .map_err(store_error)?;
                debug!("write lock row deleted by force");
            }
            Ok(removed)
        })
    }
}

struct LockRow {
    owner_host: String,
    owner_user: Option<String>,
    owner_pid: i64,
    acquired_at_ms: i64,
    heartbeat_at_ms: i64,
}

fn read_row(conn: &Connection) -> Result<Option<LockRecord>, StoreError> {
    let row = conn
        .query_row(
            "SELECT owner_host, owner_user, owner_pid, acquired_at_ms, heartbeat_at_ms
             FROM write_lock WHERE id = 1",
            [],
            |row| {
                Ok(LockRow {
                    owner_host: row.get(0)?,
                    owner_user: row.get(1)?,
                    owner_pid: row.get(2)?,
                    acquired_at_ms: row.get(3)?,
                    heartbeat_at_ms: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(store_error)?;
    row.map(decode).transpose()
}

fn decode(row: LockRow) -> Result<LockRecord, StoreError> {
    let owner_process_id = u32::try_from(row.owner_pid)
        .map_err(|_| StoreError::Corrupt(format!("process id {} out of range", row.owner_pid)))?;
    Ok(LockRecord {
        owner_host: row.owner_host,
        owner_user: row.owner_user,
        owner_process_id,
        acquired_at: from_ms(row.acquired_at_ms)?,
        last_heartbeat_at: from_ms(row.heartbeat_at_ms)?,
    })
}

fn to_ms(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn from_ms(ms: i64) -> Result<DateTime<Utc>, StoreError> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| StoreError::Corrupt(format!("timestamp {ms} out of range")))
}

#[cfg(test)]
#[path = "lock_store_tests.rs"]
mod tests;
