// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Employee records in the shared database
//!
//! Dates are stored as ISO `YYYY-MM-DD` text. Callers are expected to hold the
//! write lock around mutations; the store itself does not check.

use crate::error::StorageError;
use crate::schema;
use chrono::NaiveDate;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};
use wh_core::{
    CacesKind, Category, Certification, Employee, Fitness, MedicalVisit, NewCertification,
    NewEmployee, NewMedicalVisit, NewTraining, TrackedRecord, Training, VisitKind,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct RecordStore {
    conn: Mutex<Connection>,
}

impl RecordStore {
    /// Open the database file, creating the schema if needed
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = schema::open(path)?;
        schema::bootstrap(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn add_employee(&self, new: &NewEmployee) -> Result<Employee, StorageError> {
        new.validate()?;
        let conn = self.conn();
        conn.execute(
            "INSERT INTO employees (first_name, last_name, hired_on, active) VALUES (?1, ?2, ?3, 1)",
            params![
                new.first_name.trim(),
                new.last_name.trim(),
                new.hired_on.map(format_date),
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(employee_id = id, "employee added");
        Ok(Employee {
            id,
            first_name: new.first_name.trim().to_string(),
            last_name: new.last_name.trim().to_string(),
            hired_on: new.hired_on,
            active: true,
        })
    }

    pub fn get_employee(&self, id: i64) -> Result<Option<Employee>, StorageError> {
        let conn = self.conn();
        let employee = conn
            .query_row(
                "SELECT id, first_name, last_name, hired_on, active FROM employees WHERE id = ?1",
                params![id],
                employee_from_row,
            )
            .optional()?;
        Ok(employee)
    }

    pub fn list_employees(&self, include_inactive: bool) -> Result<Vec<Employee>, StorageError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, first_name, last_name, hired_on, active FROM employees
             WHERE active = 1 OR ?1
             ORDER BY last_name COLLATE NOCASE, first_name COLLATE NOCASE, id",
        )?;
        let rows = stmt.query_map(params![include_inactive], employee_from_row)?;
        let mut employees = Vec::new();
        for row in rows {
            employees.push(row?);
        }
        Ok(employees)
    }

    pub fn set_employee_active(&self, id: i64, active: bool) -> Result<(), StorageError> {
        let changed = self.conn().execute(
            "UPDATE employees SET active = ?1 WHERE id = ?2",
            params![active, id],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound {
                kind: "employee",
                id,
            });
        }
        info!(employee_id = id, active, "employee status changed");
        Ok(())
    }

    /// Delete an employee together with all their records
    pub fn delete_employee(&self, id: i64) -> Result<(), StorageError> {
        let changed = self
            .conn()
            .execute("DELETE FROM employees WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StorageError::NotFound {
                kind: "employee",
                id,
            });
        }
        info!(employee_id = id, "employee deleted");
        Ok(())
    }

    pub fn add_certification(&self, new: &NewCertification) -> Result<Certification, StorageError> {
        let expires_on = new.validate()?;
        let conn = self.conn();
        require_employee(&conn, new.employee_id)?;
        conn.execute(
            "INSERT INTO certifications (employee_id, kind, obtained_on, expires_on)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                new.employee_id,
                new.kind.as_str(),
                format_date(new.obtained_on),
                format_date(expires_on),
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(certification_id = id, employee_id = new.employee_id, kind = %new.kind, "certification added");
        Ok(Certification {
            id,
            employee_id: new.employee_id,
            kind: new.kind,
            obtained_on: new.obtained_on,
            expires_on: Some(expires_on),
        })
    }

    pub fn add_medical_visit(&self, new: &NewMedicalVisit) -> Result<MedicalVisit, StorageError> {
        let expires_on = new.validate()?;
        let conn = self.conn();
        require_employee(&conn, new.employee_id)?;
        conn.execute(
            "INSERT INTO medical_visits (employee_id, visit_kind, visited_on, fitness, expires_on)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.employee_id,
                new.visit_kind.as_str(),
                format_date(new.visited_on),
                new.fitness.as_str(),
                expires_on.map(format_date),
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(visit_id = id, employee_id = new.employee_id, "medical visit added");
        Ok(MedicalVisit {
            id,
            employee_id: new.employee_id,
            visit_kind: new.visit_kind,
            visited_on: new.visited_on,
            fitness: new.fitness,
            expires_on,
        })
    }

    pub fn add_training(&self, new: &NewTraining) -> Result<Training, StorageError> {
        new.validate()?;
        let conn = self.conn();
        require_employee(&conn, new.employee_id)?;
        conn.execute(
            "INSERT INTO trainings (employee_id, title, completed_on, expires_on)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                new.employee_id,
                new.title.trim(),
                format_date(new.completed_on),
                new.expires_on.map(format_date),
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(training_id = id, employee_id = new.employee_id, "training added");
        Ok(Training {
            id,
            employee_id: new.employee_id,
            title: new.title.trim().to_string(),
            completed_on: new.completed_on,
            expires_on: new.expires_on,
        })
    }

    pub fn certifications_for(&self, employee_id: i64) -> Result<Vec<Certification>, StorageError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, employee_id, kind, obtained_on, expires_on FROM certifications
             WHERE employee_id = ?1 ORDER BY obtained_on, id",
        )?;
        let mut rows = stmt.query(params![employee_id])?;
        let mut certifications = Vec::new();
        while let Some(row) = rows.next()? {
            let kind: String = row.get(2)?;
            certifications.push(Certification {
                id: row.get(0)?,
                employee_id: row.get(1)?,
                kind: kind.parse::<CacesKind>()?,
                obtained_on: parse_required(row, 3, "obtained_on")?,
                expires_on: optional_date(row, 4)?,
            });
        }
        Ok(certifications)
    }

    pub fn medical_visits_for(&self, employee_id: i64) -> Result<Vec<MedicalVisit>, StorageError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, employee_id, visit_kind, visited_on, fitness, expires_on FROM medical_visits
             WHERE employee_id = ?1 ORDER BY visited_on, id",
        )?;
        let mut rows = stmt.query(params![employee_id])?;
        let mut visits = Vec::new();
        while let Some(row) = rows.next()? {
            let visit_kind: String = row.get(2)?;
            let fitness: String = row.get(4)?;
            visits.push(MedicalVisit {
                id: row.get(0)?,
                employee_id: row.get(1)?,
                visit_kind: visit_kind.parse::<VisitKind>()?,
                visited_on: parse_required(row, 3, "visited_on")?,
                fitness: fitness.parse::<Fitness>()?,
                expires_on: optional_date(row, 5)?,
            });
        }
        Ok(visits)
    }

    pub fn trainings_for(&self, employee_id: i64) -> Result<Vec<Training>, StorageError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, employee_id, title, completed_on, expires_on FROM trainings
             WHERE employee_id = ?1 ORDER BY completed_on, id",
        )?;
        let mut rows = stmt.query(params![employee_id])?;
        let mut trainings = Vec::new();
        while let Some(row) = rows.next()? {
            trainings.push(Training {
                id: row.get(0)?,
                employee_id: row.get(1)?,
                title: row.get(2)?,
                completed_on: parse_required(row, 3, "completed_on")?,
                expires_on: optional_date(row, 4)?,
            });
        }
        Ok(trainings)
    }

    /// Every expiring record of active employees, for the alert engine.
    ///
    /// Certifications and visits with a missing or unreadable expiration come
    /// back with `expiration_date = None`. Trainings without an expiration never
    /// expire and are left out.
    pub fn tracked_records(&self) -> Result<Vec<TrackedRecord>, StorageError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT e.id, e.first_name, e.last_name, 'caces', 'CACES ' || c.kind, c.expires_on
               FROM certifications c JOIN employees e ON e.id = c.employee_id
              WHERE e.active = 1
             UNION ALL
             SELECT e.id, e.first_name, e.last_name, 'medical-visit',
                    'Medical visit (' || v.visit_kind || ')', v.expires_on
               FROM medical_visits v JOIN employees e ON e.id = v.employee_id
              WHERE e.active = 1
             UNION ALL
             SELECT e.id, e.first_name, e.last_name, 'training', t.title, t.expires_on
               FROM trainings t JOIN employees e ON e.id = t.employee_id
              WHERE e.active = 1 AND t.expires_on IS NOT NULL",
        )?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let first_name: String = row.get(1)?;
            let last_name: String = row.get(2)?;
            let category: String = row.get(3)?;
            let label: String = row.get(4)?;
            let expiration_date = optional_date(row, 5)?;
            if expiration_date.is_none() {
                debug!(raw = ?row.get_ref(5)?, record = %label, "unreadable expiration date");
            }
            records.push(TrackedRecord::new(
                row.get(0)?,
                category.parse::<Category>()?,
                format!("{first_name} {last_name}: {label}"),
                expiration_date,
            ));
        }
        Ok(records)
    }
}

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        hired_on: optional_date(row, 3)?,
        active: row.get(4)?,
    })
}

fn require_employee(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let exists = conn
        .query_row("SELECT 1 FROM employees WHERE id = ?1", params![id], |_| Ok(()))
        .optional()?;
    exists.ok_or(StorageError::NotFound {
        kind: "employee",
        id,
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Read a date cell leniently: anything but well-formed text is `None`
fn optional_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let date = match row.get_ref(idx)? {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()),
        _ => None,
    };
    Ok(date)
}

fn parse_required(row: &Row<'_>, idx: usize, column: &'static str) -> Result<NaiveDate, StorageError> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| StorageError::Corrupt {
        column,
        value: raw,
    })
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
