use crate::model::Sentiment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
    pub true_sentiment: Sentiment,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub sentiment: Sentiment,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
