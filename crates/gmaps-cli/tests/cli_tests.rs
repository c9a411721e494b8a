//! Integration tests for the `gmaps-cli` commands.
//!
//! These use `assert_cmd` to verify:
//! - text and JSON output against a local fake of the Google Maps API
//! - argument validation and exit codes
//! - missing-credential and upstream failures

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use gmaps_lib::test_utils::{FakeUpstream, Reply};
use predicates::prelude::*;
use serde_json::{json, Value};

/// `gmaps-cli` with a clean credential environment.
fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("gmaps-cli");
    cmd.env_remove("GOOGLE_MAPS_API_KEY")
        .env_remove("GOOGLE_MAPS_API_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("directions"))
        .stdout(predicate::str::contains("mcp"));
}

#[test]
fn test_unknown_mode_is_rejected() {
    cli()
        .args(["directions", "--from", "A", "--to", "B", "--mode", "teleport"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown travel mode"));
}

#[test]
fn test_missing_api_key_fails() {
    cli()
        .args(["--base-url", "http://127.0.0.1:9", "search", "pizza"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GOOGLE_MAPS_API_KEY"));
}

#[test]
fn test_invalid_timeout_warning_reaches_stderr() {
    cli()
        .env("GOOGLE_MAPS_TIMEOUT_SECS", "soon")
        .args(["--base-url", "http://127.0.0.1:9", "search", "pizza"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ignoring invalid GOOGLE_MAPS_TIMEOUT_SECS"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_search_text_output() {
    let upstream = FakeUpstream::spawn().await;

    cli()
        .args(["--api-key", "test-key", "--base-url", upstream.base_url()])
        .args(["search", "pizza near the harbour"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. Harbour Pizza & Pasta"))
        .stdout(predicate::str::contains("4.5 (1287 ratings) | Open now"));

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/place/textsearch/json");
    assert_eq!(requests[0].param("query"), Some("pizza near the harbour"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_directions_json_output() {
    let upstream = FakeUpstream::spawn().await;

    let output = cli()
        .env("GOOGLE_MAPS_API_KEY", "env-key")
        .args(["--base-url", upstream.base_url(), "--format", "json"])
        .args(["directions", "--from", "Central", "--to", "Harbour Park", "--mode", "TRANSIT"])
        .output()
        .expect("run gmaps-cli");

    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(body["summary"]["totalDistance"], "6.4 km");
    assert_eq!(body["steps"][1]["transitInfo"]["vehicle"], "Tram");

    let requests = upstream.requests();
    assert_eq!(requests[0].param("mode"), Some("transit"));
    assert_eq!(requests[0].param("key"), Some("env-key"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_directions_defaults_to_driving() {
    let upstream = FakeUpstream::spawn().await;

    cli()
        .args(["--api-key", "k", "--base-url", upstream.base_url()])
        .args(["directions", "--from", "A", "--to", "B"])
        .assert()
        .success();

    assert_eq!(upstream.requests()[0].param("mode"), Some("driving"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_upstream_denial_is_reported() {
    let upstream = FakeUpstream::spawn().await;
    upstream.set_reply(Reply::json(json!({
        "status": "REQUEST_DENIED",
        "error_message": "This API project is not authorized to use this API."
    })));

    cli()
        .args(["--api-key", "k", "--base-url", upstream.base_url()])
        .args(["search", "pizza"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("REQUEST_DENIED"))
        .stderr(predicate::str::contains("not authorized"));
}
