// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expiration alerts

use crate::app::App;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::fmt;
use wh_core::{AlertItem, AlertQuery, AlertSummary, Category, UrgencyTier};

#[derive(Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Subcommand)]
pub enum AlertsCommand {
    /// List records expiring soon, most urgent first
    List {
        /// caces, medical-visit or training
        #[arg(long)]
        category: Option<Category>,
        /// How far ahead to look, in days (default from config)
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Count expiring records per urgency tier
    Summary {
        #[arg(long, allow_negative_numbers = true)]
        days: Option<i64>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

pub fn handle(app: &App, command: AlertsCommand) -> Result<()> {
    match command {
        AlertsCommand::List {
            category,
            days,
            format,
        } => {
            let query = run_query(app, category, days)?;
            output::print(&AlertList(query), format)
        }
        AlertsCommand::Summary { days, format } => {
            let summary = run_query(app, None, days)?.summary();
            output::print(&SummaryView(summary), format)
        }
    }
}

fn run_query(app: &App, category: Option<Category>, days: Option<i64>) -> Result<AlertQuery> {
    let horizon = days.unwrap_or(app.config.alerts.horizon_days);
    let records = app.tracked_records()?;
    Ok(app.engine().query_alerts(&records, category, horizon))
}

fn unevaluable_line(f: &mut fmt::Formatter<'_>, unevaluable: usize) -> fmt::Result {
    if unevaluable > 0 {
        writeln!(
            f,
            "{} could not be evaluated",
            output::plural(unevaluable, "record", "records")
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(transparent)]
struct AlertList(AlertQuery);

impl fmt::Display for AlertList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = &self.0;
        if query.items.is_empty() {
            writeln!(f, "No expiring records.")?;
        } else {
            writeln!(
                f,
                "{:<9} {:>6} {:<11} {:<14} DESCRIPTION",
                "URGENCY", "DAYS", "EXPIRES", "CATEGORY"
            )?;
            for item in &query.items {
                write_item(f, item)?;
            }
        }
        unevaluable_line(f, query.unevaluable)
    }
}

fn write_item(f: &mut fmt::Formatter<'_>, item: &AlertItem) -> fmt::Result {
    writeln!(
        f,
        "{:<9} {:>6} {:<11} {:<14} {}",
        item.urgency.label(),
        item.days_remaining,
        item.expiration_date,
        item.category,
        output::truncate(&item.description, 60)
    )
}

#[derive(Serialize)]
#[serde(transparent)]
struct SummaryView(AlertSummary);

impl fmt::Display for SummaryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.0;
        for tier in UrgencyTier::ALL {
            writeln!(f, "{:<9} {}", tier.label(), summary.count(tier))?;
        }
        writeln!(f, "{:<9} {}", "TOTAL", summary.total)?;
        unevaluable_line(f, summary.unevaluable)
    }
}
