// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wh - warehouse staff records

mod app;
mod commands;
mod error;
mod logging;
mod output;

use anyhow::Result;
use app::App;
use clap::{Parser, Subcommand};
use commands::{alerts, employee, init, lock, records};
use error::WhError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "wh",
    version,
    about = "Warehouse staff records - CACES, medical visits and trainings"
)]
struct Cli {
    /// Configuration file (default: $WH_CONFIG, then ./wh.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding the configuration
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database
    Init,
    /// Write lock management
    Lock(lock::LockArgs),
    /// Employee management
    Employee(employee::EmployeeArgs),
    /// CACES certificates
    Cert(records::CertArgs),
    /// Medical fitness visits
    Visit(records::VisitArgs),
    /// Trainings
    Training(records::TrainingArgs),
    /// Expiration alerts
    Alerts(alerts::AlertsArgs),
}

fn run(cli: Cli) -> Result<()> {
    let app = App::load(cli.config.as_deref(), cli.db)?;
    // Flushes buffered log lines on exit
    let _log_guard = logging::setup_logging(app.config.log_file.as_deref())?;

    match cli.command {
        Commands::Init => init::handle(&app),
        Commands::Lock(args) => lock::handle(&app, args.command),
        Commands::Employee(args) => employee::handle(&app, args.command),
        Commands::Cert(args) => records::handle_cert(&app, args.command),
        Commands::Visit(args) => records::handle_visit(&app, args.command),
        Commands::Training(args) => records::handle_training(&app, args.command),
        Commands::Alerts(args) => alerts::handle(&app, args.command),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<WhError>() {
                Some(wh) => eprint!("{}", wh),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
