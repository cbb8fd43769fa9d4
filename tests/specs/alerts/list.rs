//! Alert listing specs
//!
//! Dates are far in the past or future so results do not depend on today.

use crate::prelude::*;

fn project_with_records() -> (Project, String) {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");
    temp.wh()
        .args(&[
            "cert", "add", "--employee", &id, "--kind", "R489", "--obtained", "2000-01-01",
            "--expires", "2001-01-01",
        ])
        .passes();
    temp.wh()
        .args(&[
            "training", "add", "--employee", &id, "--title", "Fire safety", "--completed",
            "2000-06-01", "--expires", "2000-12-01",
        ])
        .passes();
    temp.wh()
        .args(&[
            "cert", "add", "--employee", &id, "--kind", "R482", "--obtained", "2020-01-01",
            "--expires", "2999-01-01",
        ])
        .passes();
    (temp, id)
}

#[test]
fn empty_database_has_no_alerts() {
    let temp = Project::init();

    temp.wh()
        .args(&["alerts", "list"])
        .passes()
        .stdout_eq("No expiring records.\n");
}

#[test]
fn expired_records_are_critical_and_most_urgent_first() {
    let (temp, _) = project_with_records();

    let out = temp.wh().args(&["alerts", "list"]).passes().stdout();
    let lines: Vec<&str> = out.lines().collect();

    assert!(lines[0].starts_with("URGENCY"));
    assert_eq!(lines.len(), 3, "unexpected output:\n{out}");
    assert!(lines[1].starts_with("CRITICAL") && lines[1].contains("Fire safety"));
    assert!(lines[2].starts_with("CRITICAL") && lines[2].contains("CACES R489"));
}

#[test]
fn far_future_expiry_is_outside_the_horizon() {
    let (temp, _) = project_with_records();

    temp.wh()
        .args(&["alerts", "list"])
        .passes()
        .stdout_lacks("R482");
}

#[test]
fn category_filter_restricts_results() {
    let (temp, _) = project_with_records();

    temp.wh()
        .args(&["alerts", "list", "--category", "training"])
        .passes()
        .stdout_has("Fire safety")
        .stdout_lacks("CACES");
}

#[test]
fn deactivated_employees_are_not_tracked() {
    let (temp, id) = project_with_records();
    temp.wh().args(&["employee", "deactivate", &id]).passes();

    temp.wh()
        .args(&["alerts", "list"])
        .passes()
        .stdout_eq("No expiring records.\n");
}

#[test]
fn alerts_json_carries_days_and_urgency() {
    let (temp, id) = project_with_records();

    let json = temp
        .wh()
        .args(&["alerts", "list", "--category", "caces", "--format", "json"])
        .passes()
        .stdout_json();

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["subject_id"].to_string(), id);
    assert_eq!(items[0]["category"], "caces");
    assert_eq!(items[0]["urgency"], "critical");
    assert_eq!(items[0]["expiration_date"], "2001-01-01");
    assert!(items[0]["days_remaining"].as_i64().unwrap() < 0);
    assert_eq!(json["unevaluable"], 0);
}

#[test]
fn employee_list_shows_worst_tier() {
    let (temp, _) = project_with_records();

    temp.wh()
        .args(&["employee", "list"])
        .passes()
        .stdout_has("CRITICAL");
}
