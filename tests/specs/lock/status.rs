//! Lock status and release specs

use crate::prelude::*;

#[test]
fn status_without_lock() {
    let temp = Project::init();

    temp.wh()
        .args(&["lock", "status"])
        .passes()
        .stdout_eq("No active lock\n");
}

#[test]
fn status_json_without_lock() {
    let temp = Project::init();

    let json = temp
        .wh()
        .args(&["lock", "status", "--format", "json"])
        .passes()
        .stdout_json();
    assert_eq!(json, serde_json::json!({ "locked": false }));
}

#[test]
fn mutations_leave_no_lock_behind() {
    let temp = Project::init();
    temp.employee("Ada", "Martin");
    temp.employee("Luc", "Petit");

    temp.wh()
        .args(&["lock", "status"])
        .passes()
        .stdout_eq("No active lock\n");
}

#[test]
fn release_needs_force() {
    let temp = Project::init();

    temp.wh()
        .args(&["lock", "release"])
        .fails()
        .stderr_has("wh lock release --force");
}

#[test]
fn yes_requires_force() {
    let temp = Project::init();

    temp.wh().args(&["lock", "release", "--yes"]).fails();
}

#[test]
fn force_release_without_lock_is_a_no_op() {
    let temp = Project::init();

    temp.wh()
        .args(&["lock", "release", "--force", "--yes"])
        .passes()
        .stdout_has("No active lock");
}
