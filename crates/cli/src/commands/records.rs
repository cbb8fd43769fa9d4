// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Certification, medical visit and training entry

use crate::app::App;
use crate::error::WhError;
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use wh_core::{CacesKind, Fitness, NewCertification, NewMedicalVisit, NewTraining, VisitKind};
use wh_storage::RecordStore;

#[derive(Args)]
pub struct CertArgs {
    #[command(subcommand)]
    pub command: CertCommand,
}

#[derive(Subcommand)]
pub enum CertCommand {
    /// Record a CACES certificate
    Add {
        #[arg(long)]
        employee: i64,
        /// R482, R484, R485, R486, R489 or R490
        #[arg(long)]
        kind: CacesKind,
        #[arg(long)]
        obtained: NaiveDate,
        /// Defaults to the standard validity of the kind
        #[arg(long)]
        expires: Option<NaiveDate>,
    },
}

#[derive(Args)]
pub struct VisitArgs {
    #[command(subcommand)]
    pub command: VisitCommand,
}

#[derive(Subcommand)]
pub enum VisitCommand {
    /// Record a medical fitness visit
    Add {
        #[arg(long)]
        employee: i64,
        /// initial, periodic or recovery
        #[arg(long)]
        kind: VisitKind,
        #[arg(long)]
        date: NaiveDate,
        /// fit, fit-with-restrictions or unfit
        #[arg(long)]
        result: Fitness,
        /// Defaults to two years after a periodic visit
        #[arg(long)]
        expires: Option<NaiveDate>,
    },
}

#[derive(Args)]
pub struct TrainingArgs {
    #[command(subcommand)]
    pub command: TrainingCommand,
}

#[derive(Subcommand)]
pub enum TrainingCommand {
    /// Record a completed training
    Add {
        #[arg(long)]
        employee: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        completed: NaiveDate,
        /// Leave out for trainings that never expire
        #[arg(long)]
        expires: Option<NaiveDate>,
    },
}

fn require_employee(records: &RecordStore, id: i64) -> Result<()> {
    match records.get_employee(id)? {
        Some(_) => Ok(()),
        None => Err(WhError::employee_not_found(id).into()),
    }
}

pub fn handle_cert(app: &App, command: CertCommand) -> Result<()> {
    match command {
        CertCommand::Add {
            employee,
            kind,
            obtained,
            expires,
        } => {
            let new = NewCertification {
                employee_id: employee,
                kind,
                obtained_on: obtained,
                expires_on: expires,
            };
            let cert = app.write(|records| {
                require_employee(records, employee)?;
                Ok(records.add_certification(&new)?)
            })?;
            println!(
                "Added CACES {} for employee {} (expires {})",
                cert.kind,
                cert.employee_id,
                cert.expires_on
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
        }
    }
    Ok(())
}

pub fn handle_visit(app: &App, command: VisitCommand) -> Result<()> {
    match command {
        VisitCommand::Add {
            employee,
            kind,
            date,
            result,
            expires,
        } => {
            let new = NewMedicalVisit {
                employee_id: employee,
                visit_kind: kind,
                visited_on: date,
                fitness: result,
                expires_on: expires,
            };
            let visit = app.write(|records| {
                require_employee(records, employee)?;
                Ok(records.add_medical_visit(&new)?)
            })?;
            match visit.expires_on {
                Some(expires) => println!(
                    "Added {} medical visit for employee {} (next due {})",
                    visit.visit_kind, visit.employee_id, expires
                ),
                None => println!(
                    "Added {} medical visit for employee {}",
                    visit.visit_kind, visit.employee_id
                ),
            }
        }
    }
    Ok(())
}

pub fn handle_training(app: &App, command: TrainingCommand) -> Result<()> {
    match command {
        TrainingCommand::Add {
            employee,
            title,
            completed,
            expires,
        } => {
            let new = NewTraining {
                employee_id: employee,
                title,
                completed_on: completed,
                expires_on: expires,
            };
            let training = app.write(|records| {
                require_employee(records, employee)?;
                Ok(records.add_training(&new)?)
            })?;
            println!(
                "Added training '{}' for employee {}",
                training.title, training.employee_id
            );
        }
    }
    Ok(())
}
