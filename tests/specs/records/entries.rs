//! Certification, visit and training entry specs

use crate::prelude::*;

#[test]
fn cert_defaults_to_standard_validity() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");

    temp.wh()
        .args(&[
            "cert", "add", "--employee", &id, "--kind", "r489", "--obtained", "2024-03-15",
        ])
        .passes()
        .stdout_has("Added CACES R489")
        .stdout_has("expires 2029-03-15");

    temp.wh()
        .args(&[
            "cert", "add", "--employee", &id, "--kind", "R482", "--obtained", "2024-03-15",
        ])
        .passes()
        .stdout_has("expires 2034-03-15");
}

#[test]
fn periodic_visit_is_due_two_years_later() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");

    temp.wh()
        .args(&[
            "visit", "add", "--employee", &id, "--kind", "periodic", "--date", "2025-02-10",
            "--result", "fit",
        ])
        .passes()
        .stdout_has("next due 2027-02-10");
}

#[test]
fn training_without_expiry_never_expires() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");

    temp.wh()
        .args(&[
            "training", "add", "--employee", &id, "--title", "Fire safety", "--completed",
            "2020-01-01",
        ])
        .passes()
        .stdout_has("Added training 'Fire safety'");

    temp.wh()
        .args(&["employee", "show", &id])
        .passes()
        .stdout_has("Trainings (1)")
        .stdout_has("expires never");
}

#[test]
fn show_lists_every_record_kind() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");
    temp.wh()
        .args(&[
            "cert", "add", "--employee", &id, "--kind", "R489", "--obtained", "2024-03-15",
        ])
        .passes();
    temp.wh()
        .args(&[
            "visit", "add", "--employee", &id, "--kind", "initial", "--date", "2024-01-05",
            "--result", "fit-with-restrictions", "--expires", "2026-01-05",
        ])
        .passes();

    temp.wh()
        .args(&["employee", "show", &id])
        .passes()
        .stdout_has("Employee 1: Ada Martin")
        .stdout_has("CACES (1)")
        .stdout_has("Medical visits (1)")
        .stdout_has("fit-with-restrictions");

    let json = temp
        .wh()
        .args(&["employee", "show", &id, "--format", "json"])
        .passes()
        .stdout_json();
    assert_eq!(json["certifications"][0]["kind"], "R489");
    assert_eq!(json["medical_visits"][0]["visit_kind"], "initial");
}

#[test]
fn records_for_unknown_employee_are_rejected() {
    let temp = Project::init();

    temp.wh()
        .args(&[
            "cert", "add", "--employee", "9", "--kind", "R489", "--obtained", "2024-03-15",
        ])
        .fails()
        .stderr_has("Employee 9 not found");
}
