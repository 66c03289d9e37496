use super::types::{
    ErrorResponse, HealthResponse, MessageResponse, PredictRequest, PredictResponse,
};
use crate::{
    Error,
    model::SentimentModel,
    prediction_log::{LogRecord, PredictionLog},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const GREETING: &str = "Welcome to the Sentiment Analysis API!";

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Immutable service context, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn SentimentModel>,
    pub prediction_log: Arc<PredictionLog>,
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: GREETING.to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    let Json(request) = payload.map_err(|rejection| {
        warn!(%request_id, "Rejected prediction request: {}", rejection.body_text());
        error_response(rejection.status(), rejection.body_text())
    })?;

    if request.text.is_empty() {
        let err = Error::validation("text must not be empty");
        warn!(%request_id, "Rejected prediction request: {}", err);
        return Err(into_api_error(err));
    }

    info!(%request_id, "Received prediction request ({} chars)", request.text.len());

    let sentiment = state.model.predict(&request.text).map_err(|e| {
        error!(%request_id, "Inference failed: {}", e);
        into_api_error(match e {
            Error::Inference(_) => e,
            other => Error::inference(other.to_string()),
        })
    })?;

    let record = LogRecord::new(request.text, sentiment, request.true_sentiment);
    state.prediction_log.append(&record).await.map_err(|e| {
        error!(%request_id, "Failed to log prediction: {}", e);
        into_api_error(e)
    })?;

    info!(%request_id, "Predicted sentiment: {}", sentiment);
    Ok(Json(PredictResponse { sentiment }))
}

fn into_api_error(err: Error) -> ApiError {
    let status = if err.is_client_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    error_response(status, err.to_string())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}
