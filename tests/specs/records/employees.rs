//! Employee management specs

use crate::prelude::*;

#[test]
fn init_creates_database() {
    let temp = Project::empty();

    temp.wh()
        .args(&["init"])
        .passes()
        .stdout_has("Initialized database at wh.db");

    assert!(temp.db().is_file());
}

#[test]
fn init_twice_is_harmless() {
    let temp = Project::init();
    temp.wh().args(&["init"]).passes();
}

#[test]
fn employee_list_empty() {
    let temp = Project::init();

    temp.wh()
        .args(&["employee", "list"])
        .passes()
        .stdout_eq("No employees found.\n");
}

#[test]
fn added_employee_is_listed() {
    let temp = Project::init();

    temp.wh()
        .args(&[
            "employee", "add", "--first", "Ada", "--last", "Martin", "--hired", "2019-04-01",
        ])
        .passes()
        .stdout_has("Added employee 1: Ada Martin");

    temp.wh()
        .args(&["employee", "list"])
        .passes()
        .stdout_has("Ada Martin")
        .stdout_has("2019-04-01");
}

#[test]
fn employee_list_is_sorted_by_last_name() {
    let temp = Project::init();
    temp.employee("Zoe", "Petit");
    temp.employee("Ada", "Bernard");

    let out = temp.wh().args(&["employee", "list"]).passes().stdout();
    let bernard = out.find("Ada Bernard").unwrap();
    let petit = out.find("Zoe Petit").unwrap();
    assert!(bernard < petit, "unexpected order:\n{out}");
}

#[test]
fn blank_name_is_rejected() {
    let temp = Project::init();

    temp.wh()
        .args(&["employee", "add", "--first", " ", "--last", "Martin"])
        .fails()
        .stderr_has("first name must not be empty");
}

#[test]
fn deactivated_employee_is_hidden_by_default() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");

    temp.wh()
        .args(&["employee", "deactivate", &id])
        .passes()
        .stdout_has("Deactivated employee");

    temp.wh()
        .args(&["employee", "list"])
        .passes()
        .stdout_lacks("Ada Martin");
    temp.wh()
        .args(&["employee", "list", "--all"])
        .passes()
        .stdout_has("(inactive)");
}

#[test]
fn removed_employee_is_gone() {
    let temp = Project::init();
    let id = temp.employee("Ada", "Martin");

    temp.wh().args(&["employee", "remove", &id]).passes();

    temp.wh()
        .args(&["employee", "show", &id])
        .fails()
        .stderr_has("not found");
}

#[test]
fn employee_list_json() {
    let temp = Project::init();
    temp.employee("Ada", "Martin");

    let json = temp
        .wh()
        .args(&["employee", "list", "--format", "json"])
        .passes()
        .stdout_json();

    assert_eq!(json[0]["first_name"], "Ada");
    assert_eq!(json[0]["active"], true);
    assert!(json[0]["status"].is_null());
}
