//! End-to-end tests for `furnicfg config`.

use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[test]
fn test_config_show_defaults_json() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_in(temp_dir.path(), &["config", "show", "--json"]);
    assert_exit(&output, 0);

    let json = stdout_json(&output);
    assert_eq!(json["defaults"]["family"], "rack");
    assert_eq!(json["output"]["json"], false);
    assert_eq!(json["logging"]["level"], "warn");
    assert!(json["path"].as_str().unwrap().ends_with("config.toml"));
}

#[test]
fn test_config_set_and_show() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_in(
        temp_dir.path(),
        &["config", "set", "--family", "wardrobe", "--log-level", "DEBUG"],
    );
    assert_exit(&output, 0);
    assert!(temp_dir.path().join("config.toml").exists());

    let json = stdout_json(&run_in(temp_dir.path(), &["config", "show", "--json"]));
    assert_eq!(json["defaults"]["family"], "wardrobe");
    assert_eq!(json["logging"]["level"], "debug");
}

#[test]
fn test_config_family_alias() {
    let temp_dir = TempDir::new().unwrap();
    assert_exit(&run_in(temp_dir.path(), &["config", "set", "--family", "bookcase"]), 0);
    let json = stdout_json(&run_in(temp_dir.path(), &["config", "show", "--json"]));
    assert_eq!(json["defaults"]["family"], "rack");
}

#[test]
fn test_config_show_human() {
    let output = run(&["config", "show"]);
    assert_exit(&output, 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Family: rack"));
    assert!(stdout.contains("Level: warn"));
}

#[test]
fn test_config_set_requires_an_option() {
    assert_exit(&run(&["config", "set"]), 1);
}

#[test]
fn test_config_set_rejects_bad_values() {
    let temp_dir = TempDir::new().unwrap();
    assert_exit(&run_in(temp_dir.path(), &["config", "set", "--log-level", "loud"]), 1);
    assert_exit(&run_in(temp_dir.path(), &["config", "set", "--family", "sofa"]), 1);
    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_broken_config_file_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("config.toml"), "[logging]\nlevel = \"loud\"\n").unwrap();
    assert_exit(&run_in(temp_dir.path(), &["config", "show"]), 2);
}
