//! Shared test fixtures for library and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use furnicfg::catalog::Catalog;
use furnicfg::models::{Family, FamilyConstraints, FurnitureConfig};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Loads the embedded catalog.
pub fn catalog() -> Catalog {
    Catalog::load().expect("embedded catalog should load")
}

/// Constraint table of one family.
pub fn constraints(family: Family) -> FamilyConstraints {
    catalog().family(family).clone()
}

/// Family default configuration.
pub fn default_config(family: Family) -> FurnitureConfig {
    FurnitureConfig::defaults(&constraints(family))
}

/// Path to the furnicfg binary (set by cargo at compile time).
pub fn furnicfg_bin() -> &'static str {
    env!("CARGO_BIN_EXE_furnicfg")
}

/// Runs the binary with its config directory pointed at `config_dir`.
pub fn run_in(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(furnicfg_bin())
        .env("FURNICFG_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Runs the binary with a fresh config directory and `RUST_LOG` set to `filter`.
pub fn run_logged(filter: &str, args: &[&str]) -> Output {
    let temp_dir = TempDir::new().expect("temp dir");
    Command::new(furnicfg_bin())
        .env("FURNICFG_CONFIG_DIR", temp_dir.path())
        .env("RUST_LOG", filter)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Counts stderr lines containing `needle`.
pub fn stderr_lines_containing(output: &Output, needle: &str) -> usize {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter(|line| line.contains(needle))
        .count()
}

/// Runs the binary with a fresh, empty config directory.
pub fn run(args: &[&str]) -> Output {
    let temp_dir = TempDir::new().expect("temp dir");
    run_in(temp_dir.path(), args)
}

/// Parses stdout as JSON, failing the test with stderr on error.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {stdout}\nstderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

/// Asserts the process exited with `code`, showing stderr otherwise.
pub fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "unexpected exit code. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
