// tests/cli_tests.rs
use mockito::Matcher;
use std::process::Output;
use supabase_conncheck::config::{KEY_VAR, URL_VAR};
use tokio::process::Command;

fn conncheck() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_conncheck"));
    cmd.arg("--no-env-file")
        .env_remove(URL_VAR)
        .env_remove(KEY_VAR)
        .env_remove("CONNCHECK_RESOURCE")
        .env_remove("CONNCHECK_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

async fn run(cmd: &mut Command) -> Output {
    cmd.output().await.expect("failed to run conncheck")
}

#[tokio::test]
async fn test_missing_configuration_exits_non_zero() {
    let output = run(&mut conncheck()).await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Key: Missing"));
    assert!(stdout.contains("Missing environment variables"));
}

#[tokio::test]
async fn test_successful_probe_exits_zero() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/profiles")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"count":1}]"#)
        .create_async()
        .await;

    let output = run(conncheck()
        .env(URL_VAR, server.url())
        .env(KEY_VAR, "abc123")
        .args(["--format", "json"]))
    .await;

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["configPresent"], true);
    assert_eq!(report["connectionOk"], true);
}

#[tokio::test]
async fn test_remote_rejection_exits_non_zero() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/profiles")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"Invalid API key"}"#)
        .create_async()
        .await;

    let output = run(conncheck()
        .env(URL_VAR, server.url())
        .env(KEY_VAR, "wrong"))
    .await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("❌ Supabase connection failed: Invalid API key"));
}

#[tokio::test]
async fn test_invalid_settings_exit_two() {
    let output = run(conncheck().args(["--timeout", "0"])).await;
    assert_eq!(output.status.code(), Some(2));
}

#[tokio::test]
async fn test_explicit_env_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("probe.env");
    std::fs::write(&path, format!("{}=not-a-url\n{}=abc123\n", URL_VAR, KEY_VAR)).unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_conncheck"));
    cmd.env_remove(URL_VAR)
        .env_remove(KEY_VAR)
        .arg("--env-file")
        .arg(&path);
    let output = run(&mut cmd).await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Key: Present"));
    assert!(stdout.contains("Supabase client error"));
}

#[tokio::test]
async fn test_rust_log_from_env_file_applies() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("probe.env");
    std::fs::write(&path, "RUST_LOG=debug\n").unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_conncheck"));
    cmd.env_remove(URL_VAR)
        .env_remove(KEY_VAR)
        .env_remove("RUST_LOG")
        .args(["--format", "json", "--env-file"])
        .arg(&path);
    let output = run(&mut cmd).await;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Settings loaded"));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["configPresent"], false);
    assert!(report.get("connectionOk").is_none());
}
