use super::types::{ModelArtifact, Sentiment};
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Inference seam used by the prediction service.
pub trait SentimentModel: Send + Sync {
    fn predict(&self, text: &str) -> Result<Sentiment>;
}

/// Linear classifier over word counts, loaded once from a JSON artifact.
#[derive(Debug, Clone)]
pub struct LinearTextClassifier {
    artifact: ModelArtifact,
}

impl LinearTextClassifier {
    pub fn new(artifact: ModelArtifact) -> Result<Self> {
        if artifact.weights.is_empty() {
            return Err(Error::model_unavailable("artifact has no feature weights"));
        }
        if !artifact.intercept.is_finite() || artifact.weights.values().any(|w| !w.is_finite()) {
            return Err(Error::model_unavailable("artifact contains non-finite weights"));
        }
        Ok(Self { artifact })
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading model artifact from: {}", path.display());

        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::model_unavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&raw).map_err(|e| {
            Error::model_unavailable(format!("cannot parse {}: {}", path.display(), e))
        })?;

        let model = Self::new(artifact)?;
        info!(
            "Model loaded from {} with {} features",
            path.display(),
            model.artifact.weights.len()
        );
        Ok(model)
    }

    pub fn score(&self, text: &str) -> f64 {
        tokenize(text, self.artifact.lowercase)
            .iter()
            .filter_map(|token| self.artifact.weights.get(token))
            .sum::<f64>()
            + self.artifact.intercept
    }
}

impl SentimentModel for LinearTextClassifier {
    fn predict(&self, text: &str) -> Result<Sentiment> {
        let score = self.score(text);
        let label = if score >= 0.0 {
            &self.artifact.labels.positive
        } else {
            &self.artifact.labels.negative
        };

        label
            .parse::<Sentiment>()
            .map_err(|_| Error::inference(format!("model emitted unsupported label '{}'", label)))
    }
}

/// Splits text into word tokens; apostrophes inside words are kept.
pub fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|word| word.trim_matches('\''))
        .filter(|word| !word.is_empty())
        .map(|word| {
            if lowercase {
                word.to_lowercase()
            } else {
                word.to_string()
            }
        })
        .collect()
}
