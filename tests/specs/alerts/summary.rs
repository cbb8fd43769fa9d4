//! Alert summary specs

use crate::prelude::*;

#[test]
fn summary_of_empty_database() {
    let temp = Project::init();

    temp.wh()
        .args(&["alerts", "summary"])
        .passes()
        .stdout_eq("CRITICAL  0\nWARNING   0\nINFO      0\nOK        0\nTOTAL     0\n");
}

#[test]
fn summary_counts_expired_records() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");
    for kind in ["R489", "R486"] {
        temp.wh()
            .args(&[
                "cert", "add", "--employee", &id, "--kind", kind, "--obtained", "2000-01-01",
                "--expires", "2001-01-01",
            ])
            .passes();
    }

    let json = temp
        .wh()
        .args(&["alerts", "summary", "--format", "json"])
        .passes()
        .stdout_json();
    assert_eq!(json["critical"], 2);
    assert_eq!(json["total"], 2);
}

#[test]
fn wide_horizon_includes_ok_records() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");
    temp.wh()
        .args(&[
            "cert", "add", "--employee", &id, "--kind", "R482", "--obtained", "2020-01-01",
            "--expires", "2999-01-01",
        ])
        .passes();

    temp.wh()
        .args(&["alerts", "summary", "--days", "1000000"])
        .passes()
        .stdout_has("OK        1")
        .stdout_has("TOTAL     1");
}

#[test]
fn visit_without_expiry_is_reported_as_unevaluable() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");
    temp.wh()
        .args(&[
            "visit", "add", "--employee", &id, "--kind", "initial", "--date", "2024-01-05",
            "--result", "fit",
        ])
        .passes();

    temp.wh()
        .args(&["alerts", "summary"])
        .passes()
        .stdout_has("TOTAL     0")
        .stdout_has("1 record could not be evaluated");

    temp.wh()
        .args(&["alerts", "list"])
        .passes()
        .stdout_has("1 record could not be evaluated");
}
