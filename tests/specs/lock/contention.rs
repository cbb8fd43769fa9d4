//! Specs for a second process meeting a held write lock

use crate::prelude::*;

#[test]
fn status_shows_holder() {
    let temp = Project::init();
    let _holder = temp.hold_lock();

    temp.wh()
        .args(&["lock", "status"])
        .passes()
        .stdout_has("Locked by ")
        .stdout_has("Heartbeat:")
        .stdout_has("Stale:     no");

    let json = temp
        .wh()
        .args(&["lock", "status", "--format", "json"])
        .passes()
        .stdout_json();
    assert_eq!(json["locked"], true);
    assert_eq!(json["stale"], false);
}

#[test]
fn mutation_is_refused_while_locked() {
    let temp = Project::init();
    let _holder = temp.hold_lock();

    temp.wh()
        .args(&["employee", "add", "--first", "Ada", "--last", "Martin"])
        .fails()
        .stderr_has("error: The database is locked by ")
        .stderr_has("wh lock status");
}

#[test]
fn reads_are_allowed_while_locked() {
    let temp = Project::init();
    let _holder = temp.hold_lock();

    temp.wh().args(&["employee", "list"]).passes();
    temp.wh().args(&["alerts", "summary"]).passes();
}

#[test]
fn second_holder_is_refused() {
    let temp = Project::init();
    let _holder = temp.hold_lock();

    temp.wh()
        .args(&["lock", "hold"])
        .fails()
        .stderr_has("locked by");
}

#[test]
fn crashed_holder_needs_confirmed_force_release() {
    let temp = Project::init();
    temp.hold_lock().crash();

    // Nothing released the record
    temp.wh()
        .args(&["lock", "status"])
        .passes()
        .stdout_has("Locked by ");

    temp.wh()
        .args(&["lock", "release", "--force"])
        .fails()
        .stdout_has("Locked by ")
        .stderr_has("Not released")
        .stderr_has("wh lock release --force --yes");

    temp.wh()
        .args(&["lock", "release", "--force", "--yes"])
        .passes()
        .stdout_has("Released lock held by ");

    temp.wh()
        .args(&["employee", "add", "--first", "Ada", "--last", "Martin"])
        .passes();
}
