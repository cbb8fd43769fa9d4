//! Error reporting specs

use crate::prelude::*;

#[test]
fn unknown_command_fails() {
    let temp = Project::empty();

    temp.wh()
        .args(&["frobnicate"])
        .fails()
        .stderr_has("unrecognized subcommand");
}

#[test]
fn unknown_caces_kind_is_rejected() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");

    temp.wh()
        .args(&[
            "cert", "add", "--employee", &id, "--kind", "R999", "--obtained", "2024-01-01",
        ])
        .fails()
        .stderr_has("unknown CACES kind");
}

#[test]
fn malformed_date_is_rejected() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");

    temp.wh()
        .args(&[
            "cert", "add", "--employee", &id, "--kind", "R489", "--obtained", "01/02/2024",
        ])
        .fails()
        .stderr_has("--obtained");
}

#[test]
fn missing_employee_gets_a_suggestion() {
    let temp = Project::init();

    temp.wh()
        .args(&["employee", "show", "42"])
        .fails()
        .stderr_has("error: Employee 42 not found")
        .stderr_has("wh employee list --all");
}

#[test]
fn expiration_before_start_is_rejected() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");

    temp.wh()
        .args(&[
            "training", "add", "--employee", &id, "--title", "Fire safety", "--completed",
            "2024-06-01", "--expires", "2024-01-01",
        ])
        .fails()
        .stderr_has("is before 2024-06-01");
}
