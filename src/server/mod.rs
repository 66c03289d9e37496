pub mod handlers;
pub mod types;

use crate::{
    config::Config, model::LinearTextClassifier, prediction_log::PredictionLog, Result,
};
use axum::{
    routing::{get, post},
    Router,
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // A model that fails to load keeps the service from ever accepting traffic
    let model = LinearTextClassifier::load(&config.model.path).await?;
    let prediction_log = PredictionLog::open(&config.prediction_log.path).await?;

    let app_state = AppState {
        model: Arc::new(model),
        prediction_log: Arc::new(prediction_log),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting prediction service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
