use axum::{Router, body::Body, http::Request, response::Response};
use sentiment_service::{
    model::{LabelMap, LinearTextClassifier, ModelArtifact, SentimentModel},
    prediction_log::PredictionLog,
    server::{self, handlers::AppState},
};
use serde_json::Value;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

/// Small hand-weighted classifier good enough for the test sentences
pub fn sample_classifier() -> LinearTextClassifier {
    let weights = [
        ("great", 1.5),
        ("funny", 1.2),
        ("loved", 1.4),
        ("good", 0.8),
        ("awful", -1.8),
        ("sleep", -1.1),
        ("boring", -1.3),
        ("bad", -0.9),
    ];
    LinearTextClassifier::new(ModelArtifact {
        labels: LabelMap::default(),
        intercept: 0.0,
        lowercase: true,
        weights: weights
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),
    })
    .expect("sample classifier is valid")
}

pub struct TestApp {
    pub router: Router,
    pub log_path: PathBuf,
    pub prediction_log: Arc<PredictionLog>,
    _temp_dir: TempDir,
}

/// Builds the prediction router around `model` with a log in a fresh temp dir
pub async fn create_test_app(model: Arc<dyn SentimentModel>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let log_path = temp_dir.path().join("logs").join("prediction_logs.json");
    let prediction_log = Arc::new(PredictionLog::open(&log_path).await.unwrap());

    let state = AppState {
        model,
        prediction_log: Arc::clone(&prediction_log),
    };

    TestApp {
        router: server::router(state),
        log_path,
        prediction_log,
        _temp_dir: temp_dir,
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Counts non-empty lines in the NDJSON log
pub async fn log_line_count(path: &Path) -> usize {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => content.lines().filter(|l| !l.trim().is_empty()).count(),
        Err(_) => 0,
    }
}

/// Reference CSV shaped like the IMDB dataset
pub const SAMPLE_REFERENCE_CSV: &str = "review,sentiment
\"One of the best films I have seen, truly great.\",positive
\"Awful. Just awful, I fell asleep.\",negative
\"A fun, light comedy.\",positive
\"Boring plot, bad acting and a weak ending.\",negative
";
