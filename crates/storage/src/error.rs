// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage errors

use rusqlite::ErrorCode;
use thiserror::Error;
use wh_core::{RecordError, StoreError};

/// Errors raised by the record store and schema bootstrap
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database schema version {found} is newer than supported {supported}")]
    SchemaTooNew { found: i64, supported: i64 },

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("unreadable {column} value '{value}'")]
    Corrupt { column: &'static str, value: String },
}

pub(crate) fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    )
}

/// Map a SQLite failure onto the lock-store taxonomy
pub(crate) fn store_error(err: rusqlite::Error) -> StoreError {
    if is_busy(&err) {
        return StoreError::Busy(err.to_string());
    }
    match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseCorrupt | ErrorCode::NotADatabase) => {
            StoreError::Corrupt(err.to_string())
        }
        _ => StoreError::Unavailable(err.to_string()),
    }
}
