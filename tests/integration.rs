use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn atlas_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("atlas");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    // The key variable is unique to this test run so a developer's real
    // key never leaks in.
    let config_content = format!(
        r#"[db]
path = "{}/data/atlas.sqlite"

[catalog]
api_key_env = "ATLAS_TEST_KEY_THAT_IS_NEVER_SET"
pages_per_unit = 1
units = [
    {{ query = "unit_code:NMAI", label = "American Indian" }},
    {{ query = "pottery", label = "Pottery search" }},
]

[server]
bind = "127.0.0.1:5999"
"#,
        root.display()
    );

    let config_path = config_dir.join("atlas.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_atlas(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = atlas_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run atlas binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_init_creates_database() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_atlas(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
    assert!(tmp.path().join("data/atlas.sqlite").exists());
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_atlas(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_atlas(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_units_lists_queries() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_atlas(&config_path, &["units"]);
    assert!(success);
    assert!(stdout.contains("NOT SET"));
    assert!(stdout.contains("unit_code:NMAI"));
    assert!(stdout.contains("National Museum of the American Indian"));
    assert!(stdout.contains("Pottery search"));
}

#[test]
fn test_sync_without_api_key_fails() {
    let (_tmp, config_path) = setup_test_env();

    run_atlas(&config_path, &["init"]);
    let (_, stderr, success) = run_atlas(&config_path, &["sync"]);
    assert!(!success, "sync should fail without an API key");
    assert!(
        stderr.contains("ATLAS_TEST_KEY_THAT_IS_NEVER_SET"),
        "error should name the variable, got: {}",
        stderr
    );
}

#[test]
fn test_sync_rejects_zero_limit() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success) = run_atlas(&config_path, &["sync", "--limit", "0"]);
    assert!(!success);
}

#[test]
fn test_stats_on_empty_database() {
    let (_tmp, config_path) = setup_test_env();

    run_atlas(&config_path, &["init"]);
    let (stdout, stderr, success) = run_atlas(&config_path, &["stats"]);
    assert!(success, "stats failed: {}", stderr);
    assert!(stdout.contains("Artifacts:   0"));
    assert!(stdout.contains("never"));
}

#[test]
fn test_get_missing_artifact_fails() {
    let (_tmp, config_path) = setup_test_env();

    run_atlas(&config_path, &["init"]);
    let (_, stderr, success) = run_atlas(&config_path, &["get", "edanmdm:nope"]);
    assert!(!success);
    assert!(stderr.contains("artifact not found"));
}

#[test]
fn test_export_empty_collection() {
    let (tmp, config_path) = setup_test_env();

    run_atlas(&config_path, &["init"]);
    let (stdout, _, success) = run_atlas(&config_path, &["export"]);
    assert!(success);
    assert_eq!(stdout.trim(), "[]");

    let out = tmp.path().join("out/collection.json");
    let (_, stderr, success) =
        run_atlas(&config_path, &["export", "--output", out.to_str().unwrap()]);
    assert!(success);
    assert!(stderr.contains("Exported 0 artifacts"));
    assert_eq!(fs::read_to_string(&out).unwrap().trim(), "[]");
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_atlas(&tmp.path().join("nope.toml"), &["init"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}
