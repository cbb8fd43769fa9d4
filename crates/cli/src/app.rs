// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved configuration and the handles commands work with

use crate::error::WhError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use wh_core::{
    AlertEngine, AppConfig, LockError, LockManager, LockOwner, LockStatus, TrackedRecord,
};
use wh_storage::{RecordStore, SqliteLockStore};

pub struct App {
    pub config: AppConfig,
    pub owner: LockOwner,
}

impl App {
    /// Load configuration from `--config` or the usual places, then apply `--db`
    pub fn load(config_path: Option<&Path>, db: Option<PathBuf>) -> Result<Self> {
        let mut config = AppConfig::discover(config_path).context("loading configuration")?;
        if let Some(db) = db {
            config.database = db;
        }
        Ok(Self {
            config,
            owner: LockOwner::current(),
        })
    }

    pub fn database(&self) -> &Path {
        &self.config.database
    }

    pub fn records(&self) -> Result<RecordStore> {
        RecordStore::open(self.database())
            .with_context(|| format!("opening database {}", self.database().display()))
    }

    pub fn lock_store(&self) -> Result<SqliteLockStore> {
        SqliteLockStore::open(self.database())
            .with_context(|| format!("opening database {}", self.database().display()))
    }

    pub fn lock_manager(&self) -> Result<LockManager<SqliteLockStore>> {
        Ok(LockManager::new(
            Arc::new(self.lock_store()?),
            self.owner.clone(),
            self.config.lock.clone(),
        ))
    }

    pub fn engine(&self) -> AlertEngine {
        AlertEngine::new(self.config.alerts.thresholds())
    }

    /// Read every record the alert engine looks at
    pub fn tracked_records(&self) -> Result<Vec<TrackedRecord>> {
        Ok(self.records()?.tracked_records()?)
    }

    /// Run a mutation while holding the write lock
    pub fn write<T>(&self, f: impl FnOnce(&RecordStore) -> Result<T>) -> Result<T> {
        let records = self.records()?;
        let manager = self.lock_manager()?;

        manager
            .with_lock(|_| {
                let value = f(&records)?;
                if manager.status() == LockStatus::Lost {
                    warn!(owner = %self.owner, "write lock was lost during the update");
                    eprint!("{}", WhError::lock_lost(&self.owner));
                }
                Ok(value)
            })
            .map_err(|err: anyhow::Error| match err.downcast::<LockError>() {
                Ok(LockError::Held(held)) => WhError::lock_held(&held).into(),
                Ok(other) => anyhow::Error::new(other),
                Err(err) => err,
            })
    }
}
