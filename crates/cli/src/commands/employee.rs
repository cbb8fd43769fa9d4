// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Employee commands

use crate::app::App;
use crate::error::WhError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use wh_core::{Certification, Employee, MedicalVisit, NewEmployee, Training, UrgencyTier};

#[derive(Args)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    pub command: EmployeeCommand,
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// Add an employee
    Add {
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        /// Hiring date (YYYY-MM-DD)
        #[arg(long)]
        hired: Option<NaiveDate>,
    },
    /// List employees with their most urgent expiration
    List {
        /// Include deactivated employees
        #[arg(long)]
        all: bool,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show one employee and their records
    Show {
        id: i64,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Stop tracking an employee without deleting their history
    Deactivate { id: i64 },
    /// Delete an employee and all their records
    Remove { id: i64 },
}

pub fn handle(app: &App, command: EmployeeCommand) -> Result<()> {
    match command {
        EmployeeCommand::Add { first, last, hired } => {
            let mut new = NewEmployee::new(first, last);
            if let Some(hired) = hired {
                new = new.hired_on(hired);
            }
            let employee = app.write(|records| Ok(records.add_employee(&new)?))?;
            println!("Added employee {}: {}", employee.id, employee.full_name());
        }
        EmployeeCommand::List { all, format } => {
            let employees = app.records()?.list_employees(all)?;
            let status = app.engine().employee_status(&app.tracked_records()?);
            output::print(&EmployeeList::new(employees, &status), format)?;
        }
        EmployeeCommand::Show { id, format } => {
            let records = app.records()?;
            let Some(employee) = records.get_employee(id)? else {
                return Err(WhError::employee_not_found(id).into());
            };
            let detail = EmployeeDetail {
                certifications: records.certifications_for(id)?,
                medical_visits: records.medical_visits_for(id)?,
                trainings: records.trainings_for(id)?,
                employee,
            };
            output::print(&detail, format)?;
        }
        EmployeeCommand::Deactivate { id } => {
            app.write(|records| {
                if records.get_employee(id)?.is_none() {
                    return Err(WhError::employee_not_found(id).into());
                }
                Ok(records.set_employee_active(id, false)?)
            })?;
            println!("Deactivated employee {}", id);
        }
        EmployeeCommand::Remove { id } => {
            app.write(|records| {
                if records.get_employee(id)?.is_none() {
                    return Err(WhError::employee_not_found(id).into());
                }
                Ok(records.delete_employee(id)?)
            })?;
            println!("Removed employee {}", id);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct EmployeeRow {
    #[serde(flatten)]
    employee: Employee,
    /// Most urgent tier over the employee's records, if any can be evaluated
    status: Option<UrgencyTier>,
}

#[derive(Serialize)]
#[serde(transparent)]
struct EmployeeList {
    rows: Vec<EmployeeRow>,
}

impl EmployeeList {
    fn new(employees: Vec<Employee>, status: &BTreeMap<i64, UrgencyTier>) -> Self {
        let rows = employees
            .into_iter()
            .map(|employee| EmployeeRow {
                status: status.get(&employee.id).copied(),
                employee,
            })
            .collect();
        Self { rows }
    }
}

impl fmt::Display for EmployeeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No employees found.");
        }
        writeln!(f, "{:<6} {:<30} {:<12} {:<10}", "ID", "NAME", "HIRED", "STATUS")?;
        for row in &self.rows {
            let hired = row
                .employee
                .hired_on
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            let mut status = row.status.map(|t| t.label()).unwrap_or("-").to_string();
            if !row.employee.active {
                status.push_str(" (inactive)");
            }
            writeln!(
                f,
                "{:<6} {:<30} {:<12} {}",
                row.employee.id,
                output::truncate(&row.employee.full_name(), 30),
                hired,
                status
            )?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct EmployeeDetail {
    #[serde(flatten)]
    employee: Employee,
    certifications: Vec<Certification>,
    medical_visits: Vec<MedicalVisit>,
    trainings: Vec<Training>,
}

fn date_or_dash(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for EmployeeDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.employee;
        writeln!(f, "Employee {}: {}", e.id, e.full_name())?;
        writeln!(f, "  Hired:  {}", date_or_dash(e.hired_on))?;
        writeln!(f, "  Active: {}", if e.active { "yes" } else { "no" })?;

        writeln!(f)?;
        writeln!(f, "CACES ({})", self.certifications.len())?;
        for cert in &self.certifications {
            writeln!(
                f,
                "  {:<6} obtained {}  expires {}",
                cert.kind,
                cert.obtained_on,
                date_or_dash(cert.expires_on)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Medical visits ({})", self.medical_visits.len())?;
        for visit in &self.medical_visits {
            writeln!(
                f,
                "  {:<9} {}  {:<21} expires {}",
                visit.visit_kind,
                visit.visited_on,
                visit.fitness,
                date_or_dash(visit.expires_on)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Trainings ({})", self.trainings.len())?;
        for training in &self.trainings {
            writeln!(
                f,
                "  {:<30} completed {}  expires {}",
                output::truncate(&training.title, 30),
                training.completed_on,
                training
                    .expires_on
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "never".to_string())
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: i64, first: &str, last: &str, active: bool) -> Employee {
        Employee {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            hired_on: NaiveDate::from_ymd_opt(2019, 4, 1),
            active,
        }
    }

    #[test]
    fn list_shows_worst_status_and_inactive_marker() {
        let status = BTreeMap::from([(1, UrgencyTier::Critical)]);
        let list = EmployeeList::new(
            vec![employee(1, "Ada", "Martin", true), employee(2, "Luc", "Petit", false)],
            &status,
        );

        let text = list.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Ada Martin") && lines[1].ends_with("CRITICAL"));
        assert!(lines[2].ends_with("- (inactive)"));
    }

    #[test]
    fn empty_list_says_so() {
        let list = EmployeeList::new(Vec::new(), &BTreeMap::new());
        assert_eq!(list.to_string(), "No employees found.\n");
        assert_eq!(serde_json::to_string(&list).unwrap(), "[]");
    }

    #[test]
    fn list_json_flattens_employee_fields() {
        let status = BTreeMap::from([(1, UrgencyTier::Warning)]);
        let list = EmployeeList::new(vec![employee(1, "Ada", "Martin", true)], &status);

        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json[0]["first_name"], "Ada");
        assert_eq!(json[0]["status"], "warning");
    }
}
