//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();

    temp.wh()
        .args(&["--help"])
        .passes()
        .stdout_has("init")
        .stdout_has("lock")
        .stdout_has("employee")
        .stdout_has("alerts");
}

#[test]
fn lock_help_lists_subcommands() {
    let temp = Project::empty();

    temp.wh()
        .args(&["lock", "--help"])
        .passes()
        .stdout_has("status")
        .stdout_has("release")
        .stdout_has("hold");
}

#[test]
fn version_flag_prints_version() {
    let temp = Project::empty();

    temp.wh().args(&["--version"]).passes().stdout_has("wh ");
}
