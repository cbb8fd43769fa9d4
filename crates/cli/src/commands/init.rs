// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::app::App;
use anyhow::Result;
use tracing::info;

/// Create the database file and schema if missing
pub fn handle(app: &App) -> Result<()> {
    // Opening either store bootstraps the shared schema
    app.records()?;
    app.lock_store()?;
    info!(database = %app.database().display(), "database initialized");
    println!("Initialized database at {}", app.database().display());
    Ok(())
}
