use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;

fn tpq() -> Command {
    let mut cmd = Command::cargo_bin("tpq").expect("binary should build");
    cmd.env_remove("TPQ_URL");
    cmd
}

fn dry_run(args: &[&str]) -> Value {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let output = tpq()
        .arg("--config-dir")
        .arg(temp_dir.path())
        .args(["query", "/v1/reviews/latest", "--dry-run"])
        .args(args)
        .output()
        .expect("binary should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_dry_run_prints_rendered_query() {
    let query = dry_run(&[
        "--filter",
        "isVerified=true",
        "--filter",
        "startDateTime=2024-02-01T00:00:00",
        "--order",
        "Rating:Desc",
        "--limit",
        "10",
        "--offset",
        "25",
    ]);

    assert_eq!(
        query,
        json!({
            "isVerified": "true",
            "startDateTime": "2024-02-01T00:00:00",
            "orderBy": ["rating.desc"],
            "perPage": "10",
            "page": "3"
        })
    );
}

#[test]
fn test_dry_run_all_and_first() {
    assert_eq!(dry_run(&["--limit", "5", "--page", "2", "--all"]), json!({}));
    assert_eq!(
        dry_run(&["--limit", "5", "--offset", "90", "--first"]),
        json!({"perPage": "1"})
    );
}

#[test]
fn test_dry_run_ignores_out_of_range_pagination() {
    assert_eq!(
        dry_run(&["--limit", "0", "--page", "-3", "--offset", "-1"]),
        json!({})
    );
}

#[test]
fn test_dry_run_rejects_malformed_order() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    tpq()
        .arg("--config-dir")
        .arg(temp_dir.path())
        .args(["query", "/v1/reviews/latest", "--dry-run", "--order", "stars"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid order 'stars'"));
}

#[test]
fn test_query_without_url_fails_with_hint() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    tpq()
        .arg("--config-dir")
        .arg(temp_dir.path())
        .args(["query", "/v1/reviews/latest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API URL is not configured"));
}

#[test]
fn test_config_set_then_show() {
    let temp_dir = tempdir().expect("Failed to create temp dir");

    tpq()
        .arg("--config-dir")
        .arg(temp_dir.path())
        .args([
            "config",
            "set",
            "--url",
            "https://api.example.test",
            "--per-page",
            "25",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved successfully."));

    tpq()
        .arg("--config-dir")
        .arg(temp_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("URL: https://api.example.test"))
        .stdout(predicate::str::contains("Default per page: 25"));
}
