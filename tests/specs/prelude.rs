//! Shared helpers for black-box specs of the `wh` binary.

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Stdio};

/// A scratch directory holding the database and any config file
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// An initialized database
    pub fn init() -> Self {
        let project = Self::empty();
        project.wh().args(&["init"]).passes();
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn db(&self) -> PathBuf {
        self.path().join("wh.db")
    }

    pub fn file(&self, rel: &str, contents: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    /// `wh` run from the project directory with a clean environment
    pub fn wh(&self) -> Cli {
        let mut cmd = Command::cargo_bin("wh").unwrap();
        cmd.current_dir(self.path())
            .env_remove("WH_CONFIG")
            .env_remove("WH_LOG")
            .env_remove("RUST_LOG");
        Cli { cmd }
    }

    /// Add an employee and return its id
    pub fn employee(&self, first: &str, last: &str) -> String {
        let out = self
            .wh()
            .args(&["employee", "add", "--first", first, "--last", last])
            .passes()
            .stdout();
        // "Added employee 3: Ada Martin"
        out.trim_start_matches("Added employee ")
            .split(':')
            .next()
            .unwrap()
            .to_string()
    }

    /// Start `wh lock hold` and wait until it reports holding the lock
    pub fn hold_lock(&self) -> Holder {
        let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("wh"))
            .args(["lock", "hold"])
            .current_dir(self.path())
            .env_remove("WH_CONFIG")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        let stdout = child.stdout.take().unwrap();
        let mut line = String::new();
        BufReader::new(stdout).read_line(&mut line).unwrap();
        assert!(
            line.starts_with("Holding write lock"),
            "unexpected hold output: {line:?}"
        );
        Holder { child }
    }
}

/// A `wh lock hold` child process, killed on drop
pub struct Holder {
    child: Child,
}

impl Holder {
    /// Kill without letting it release, like a crash
    pub fn crash(mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for Holder {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().success(),
        }
    }

    pub fn fails(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().failure(),
        }
    }
}

pub struct RunAssert {
    assert: assert_cmd::assert::Assert,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(expected)),
        }
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(unexpected).not()),
        }
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stderr(predicate::str::contains(expected)),
        }
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}
