//! Configuration file specs

use crate::prelude::*;

#[test]
fn config_file_in_working_directory_sets_database() {
    let temp = Project::empty();
    temp.file("wh.toml", "database = \"data/staff.db\"\n");
    std::fs::create_dir_all(temp.path().join("data")).unwrap();

    temp.wh()
        .args(&["init"])
        .passes()
        .stdout_has("staff.db");

    assert!(temp.path().join("data/staff.db").is_file());
}

#[test]
fn db_flag_overrides_config() {
    let temp = Project::empty();
    temp.file("wh.toml", "database = \"staff.db\"\n");

    temp.wh().args(&["--db", "other.db", "init"]).passes();

    assert!(temp.path().join("other.db").is_file());
    assert!(!temp.path().join("staff.db").exists());
}

#[test]
fn explicit_config_path_is_used() {
    let temp = Project::empty();
    temp.file("conf/custom.toml", "database = \"custom.db\"\n");

    temp.wh()
        .args(&["--config", "conf/custom.toml", "init"])
        .passes();

    // Relative paths in a config file are anchored to its directory
    assert!(temp.path().join("conf/custom.db").is_file());
}

#[test]
fn invalid_lock_timing_is_rejected() {
    let temp = Project::empty();
    temp.file(
        "wh.toml",
        "[lock]\nheartbeat_interval = \"30s\"\nstale_timeout = \"45s\"\n",
    );

    temp.wh()
        .args(&["lock", "status"])
        .fails()
        .stderr_has("stale_timeout");
}

#[test]
fn unknown_config_key_is_rejected() {
    let temp = Project::empty();
    temp.file("wh.toml", "databse = \"typo.db\"\n");

    temp.wh()
        .args(&["lock", "status"])
        .fails()
        .stderr_has("databse");
}
