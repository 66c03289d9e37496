use pretty_assertions::assert_eq;
use serde_json::json;
use std::{path::Path, process::Output};
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn failing_service() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

fn write_test_set(dir: &TempDir) -> std::path::PathBuf {
    let test_data = dir.path().join("test.json");
    let cases = json!([
        {"text": "great film", "true_label": "positive"},
        {"text": "awful", "true_label": "negative"}
    ]);
    std::fs::write(&test_data, cases.to_string()).unwrap();
    test_data
}

async fn run_evaluator(test_data: &Path, api_url: &str, extra: &[&str], rust_log: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sentiment-evaluate"));
    command
        .arg("--test-data")
        .arg(test_data)
        .arg("--api-url")
        .arg(api_url)
        .args(extra)
        .env_remove("SENTIMENT_LOG_LEVEL")
        .env_remove("RUST_LOG");
    if let Some(filter) = rust_log {
        command.env("RUST_LOG", filter);
    }
    command.output().await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stdout_holds_only_the_report() {
    let server = failing_service().await;
    let dir = TempDir::new().unwrap();
    let test_data = write_test_set(&dir);

    let output = run_evaluator(&test_data, &server.uri(), &[], None).await;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.iter().all(|line| !line.starts_with('{')), "{}", stdout);
    assert_eq!(
        lines.iter().filter(|line| line.starts_with("Request failed for text:")).count(),
        2
    );
    assert_eq!(lines.last().copied(), Some("Accuracy: 0.00% (0/0)"));

    // The per-item warnings still go out, on stderr
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("\"level\":\"WARN\""), "{}", stderr);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_log_level_flag_is_not_overridden_by_rust_log() {
    let server = failing_service().await;
    let dir = TempDir::new().unwrap();
    let test_data = write_test_set(&dir);

    let output = run_evaluator(
        &test_data,
        &server.uri(),
        &["--log-level", "error"],
        Some("warn"),
    )
    .await;
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(!stderr.contains("WARN"), "{}", stderr);

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().last(), Some("Accuracy: 0.00% (0/0)"));
}
