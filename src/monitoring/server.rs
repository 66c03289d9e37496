use super::{
    html::{escape, render_html, PAGE_TITLE},
    reference::load_reference,
    report::{build_report, DashboardReport, ReportSettings},
};
use crate::{config::Config, prediction_log::load_records, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub log_path: PathBuf,
    pub reference_path: PathBuf,
    pub settings: ReportSettings,
}

impl DashboardState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            log_path: PathBuf::from(&config.prediction_log.path),
            reference_path: PathBuf::from(&config.dashboard.reference_path),
            settings: ReportSettings::from(&config.dashboard),
        }
    }
}

/// Reads both sources fresh and builds the report. The reference data is
/// only read when the log has records.
pub async fn generate_report(state: &DashboardState) -> Result<DashboardReport> {
    let logs = load_records(&state.log_path).await?;
    if logs.is_empty() {
        debug!("Prediction log is empty, skipping analysis");
        return Ok(build_report(&logs, &[], state.settings));
    }

    let reference = load_reference(&state.reference_path).await?;
    Ok(build_report(&logs, &reference, state.settings))
}

pub async fn index(State(state): State<Arc<DashboardState>>) -> (StatusCode, Html<String>) {
    match generate_report(&state).await {
        Ok(report) => (StatusCode::OK, Html(render_html(&report))),
        Err(e) => {
            error!("Failed to build dashboard: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!(
                    "<!DOCTYPE html><html><head><title>{title}</title></head><body><h1>{title}</h1><div role=\"alert\">Failed to build dashboard: {}</div></body></html>",
                    escape(&e.to_string()),
                    title = PAGE_TITLE
                )),
            )
        }
    }
}

pub async fn report(
    State(state): State<Arc<DashboardState>>,
) -> std::result::Result<Json<DashboardReport>, (StatusCode, Json<Value>)> {
    generate_report(&state).await.map(Json).map_err(|e| {
        error!("Failed to build dashboard report: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
    })
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/report.json", get(report))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn run(config: Config) -> Result<()> {
    let state = DashboardState::from_config(&config);
    info!(
        "Dashboard reading logs from {} and reference data from {}",
        state.log_path.display(),
        state.reference_path.display()
    );

    let app = router(state);
    let addr = SocketAddr::new(config.dashboard.host.parse()?, config.dashboard.port);

    info!("Starting monitoring dashboard on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
