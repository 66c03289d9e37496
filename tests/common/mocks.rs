use async_trait::async_trait;
use sentiment_service::{
    Error, Result,
    evaluation::PredictionClient,
    model::{Sentiment, SentimentModel},
};
use std::collections::HashMap;
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// Mock model returning a fixed label, or failing every call
#[derive(Debug)]
pub struct MockModel {
    pub response: Option<Sentiment>,
    pub error: Option<String>,
    pub calls: AtomicUsize,
}

impl MockModel {
    pub fn returning(sentiment: Sentiment) -> Self {
        Self {
            response: Some(sentiment),
            error: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: impl Into<String>) -> Self {
        Self {
            response: None,
            error: Some(error.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SentimentModel for MockModel {
    fn predict(&self, _text: &str) -> Result<Sentiment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref error) = self.error {
            return Err(Error::inference(error.clone()));
        }
        self.response
            .ok_or_else(|| Error::inference("No mock response configured"))
    }
}

/// Mock prediction client answering from a lookup table keyed by text
#[derive(Debug, Default)]
pub struct MockPredictionClient {
    pub answers: HashMap<String, String>,
    pub failures: HashMap<String, String>,
    pub default_answer: Option<String>,
    pub requests: Mutex<Vec<(String, String)>>,
}

impl MockPredictionClient {
    pub fn always(label: &str) -> Self {
        Self {
            default_answer: Some(label.to_string()),
            ..Default::default()
        }
    }

    pub fn with_answer(mut self, text: &str, label: &str) -> Self {
        self.answers.insert(text.to_string(), label.to_string());
        self
    }

    pub fn with_failure(mut self, text: &str, reason: &str) -> Self {
        self.failures.insert(text.to_string(), reason.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionClient for MockPredictionClient {
    async fn predict(&self, text: &str, true_sentiment: &str) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), true_sentiment.to_string()));

        if let Some(reason) = self.failures.get(text) {
            return Err(Error::remote_call(reason.clone()));
        }
        self.answers
            .get(text)
            .or(self.default_answer.as_ref())
            .cloned()
            .ok_or_else(|| Error::remote_call("status code 500"))
    }
}
