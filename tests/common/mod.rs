#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Scratch directory for one test case; files vanish on drop.
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: tempdir().expect("temp dir"),
        }
    }

    /// Path of a (possibly not yet existing) file under the scratch dir.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write an input file and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).expect("write test input");
        path
    }

    /// Read an output file produced by the binary.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("read test output")
    }
}

/// Command handle for the csvmatch binary.
pub fn csvmatch() -> Command {
    Command::cargo_bin("csvmatch").expect("binary exists")
}

/// Run a keyed comparison of two input files, directing both artifacts
/// into the scratch dir. Returns the finished assert for further checks.
pub fn run_keyed(ws: &Scratch, a: &str, b: &str) -> assert_cmd::assert::Assert {
    csvmatch()
        .args([
            ws.path(a).to_str().expect("utf-8 path"),
            ws.path(b).to_str().expect("utf-8 path"),
            "--key",
            "id",
            "--report",
            ws.path("errors.xlsx").to_str().expect("utf-8 path"),
            "--matched",
            ws.path("matched.csv").to_str().expect("utf-8 path"),
            "--no-preview",
        ])
        .assert()
}
