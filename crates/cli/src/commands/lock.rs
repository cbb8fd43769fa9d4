// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-lock commands

use crate::app::App;
use crate::error::WhError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use wh_core::lock::StopSignal;
use wh_core::{LockRecord, LockStatus, LockStore};

#[derive(Args)]
pub struct LockArgs {
    #[command(subcommand)]
    pub command: LockCommand,
}

#[derive(Subcommand)]
pub enum LockCommand {
    /// Show who holds the write lock
    Status {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Remove another process's lock after it crashed
    Release {
        /// Remove the lock whoever holds it
        #[arg(long)]
        force: bool,
        /// Skip the confirmation step
        #[arg(long, requires = "force")]
        yes: bool,
    },
    /// Take the write lock and keep it until Ctrl-C
    Hold,
}

pub fn handle(app: &App, command: LockCommand) -> Result<()> {
    match command {
        LockCommand::Status { format } => status(app, format),
        LockCommand::Release { force, yes } => release(app, force, yes),
        LockCommand::Hold => hold(app),
    }
}

#[derive(Serialize)]
struct LockView {
    locked: bool,
    #[serde(flatten)]
    holder: Option<HolderView>,
}

#[derive(Serialize)]
struct HolderView {
    owner_host: String,
    owner_user: Option<String>,
    owner_process_id: u32,
    acquired_at: DateTime<Utc>,
    last_heartbeat_at: DateTime<Utc>,
    age_secs: u64,
    heartbeat_age_secs: u64,
    stale: bool,
}

impl LockView {
    fn new(record: Option<LockRecord>, now: DateTime<Utc>, stale_timeout: Duration) -> Self {
        let holder = record.map(|record| HolderView {
            age_secs: record.age(now).as_secs(),
            heartbeat_age_secs: record.heartbeat_age(now).as_secs(),
            stale: record.is_stale(now, stale_timeout),
            owner_host: record.owner_host,
            owner_user: record.owner_user,
            owner_process_id: record.owner_process_id,
            acquired_at: record.acquired_at,
            last_heartbeat_at: record.last_heartbeat_at,
        });
        Self {
            locked: holder.is_some(),
            holder,
        }
    }
}

impl fmt::Display for LockView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(holder) = &self.holder else {
            return writeln!(f, "No active lock");
        };
        let who = match &holder.owner_user {
            Some(user) => format!("{}@{}", user, holder.owner_host),
            None => holder.owner_host.clone(),
        };
        writeln!(f, "Locked by {} (pid {})", who, holder.owner_process_id)?;
        writeln!(
            f,
            "  Acquired:  {} ({} ago)",
            holder.acquired_at.format("%Y-%m-%d %H:%M:%S UTC"),
            humanize(holder.age_secs)
        )?;
        writeln!(
            f,
            "  Heartbeat: {} ({} ago)",
            holder.last_heartbeat_at.format("%Y-%m-%d %H:%M:%S UTC"),
            humanize(holder.heartbeat_age_secs)
        )?;
        if holder.stale {
            writeln!(f, "  Stale:     yes, the next writer will take it over")?;
        } else {
            writeln!(f, "  Stale:     no")?;
        }
        Ok(())
    }
}

fn humanize(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    match (h, m) {
        (0, 0) => format!("{s}s"),
        (0, _) => format!("{m}m {s}s"),
        _ => format!("{h}h {m}m"),
    }
}

fn status(app: &App, format: OutputFormat) -> Result<()> {
    let record = app.lock_store()?.read_active()?;
    let view = LockView::new(record, Utc::now(), app.config.lock.stale_timeout);
    output::print(&view, format)
}

fn release(app: &App, force: bool, yes: bool) -> Result<()> {
    if !force {
        return Err(WhError::new("A lock can only be released by the process holding it")
            .with_context("wh releases its own lock automatically when a command finishes")
            .with_suggestion("To remove a lock left behind by a crash: wh lock release --force")
            .into());
    }

    let store = app.lock_store()?;
    let Some(record) = store.read_active()? else {
        println!("No active lock");
        return Ok(());
    };
    let stale = record.is_stale(Utc::now(), app.config.lock.stale_timeout);
    print!(
        "{}",
        LockView::new(Some(record.clone()), Utc::now(), app.config.lock.stale_timeout)
    );

    if !yes {
        return Err(WhError::confirm_force_release(&record, stale).into());
    }

    match store.force_release()? {
        Some(removed) => {
            if !stale {
                warn!(holder = %removed.owner(), "forced release of a live write lock");
            }
            println!("Released lock held by {}", removed.owner());
        }
        None => println!("No active lock"),
    }
    Ok(())
}

fn hold(app: &App) -> Result<()> {
    let manager = app.lock_manager()?;
    let stop = Arc::new(StopSignal::new());
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.stop())?;
    }

    match manager.acquire() {
        Ok(_) => {}
        Err(wh_core::LockError::Held(held)) => return Err(WhError::lock_held(&held).into()),
        Err(err) => return Err(err.into()),
    }

    println!("Holding write lock as {}. Press Ctrl-C to release.", manager.owner());
    std::io::stdout().flush()?;

    let config = manager.config().clone();
    while !stop.wait(config.heartbeat_interval, config.stop_poll) {
        if manager.status() == LockStatus::Lost || !manager.check_lock_health() {
            manager.release();
            return Err(WhError::lock_lost(manager.owner()).into());
        }
    }

    if manager.release() {
        println!("Write lock released");
    }
    Ok(())
}
