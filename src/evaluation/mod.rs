//! Offline accuracy evaluation against a running prediction service.

mod client;
mod types;

pub use client::*;
pub use types::*;

use crate::{Error, Result};
use std::path::Path;
use tracing::{info, warn};

/// Reads a JSON array of `{text, true_label}` entries.
pub async fn load_test_set(path: impl AsRef<Path>) -> Result<Vec<TestCase>> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::dataset(format!("cannot read {}: {}", path.display(), e)))?;
    let cases: Vec<TestCase> = serde_json::from_str(&raw)
        .map_err(|e| Error::dataset(format!("cannot parse {}: {}", path.display(), e)))?;

    info!("Loaded {} test cases from {}", cases.len(), path.display());
    Ok(cases)
}

/// Sends every case to the service and tallies exact label matches.
///
/// A failed request is recorded in `failures` and the run moves on.
pub async fn evaluate<C>(client: &C, cases: &[TestCase]) -> EvaluationSummary
where
    C: PredictionClient + ?Sized,
{
    let mut summary = EvaluationSummary::default();

    for case in cases {
        match client.predict(&case.text, &case.true_label).await {
            Ok(predicted) => {
                summary.total += 1;
                if predicted == case.true_label {
                    summary.correct += 1;
                }
            }
            Err(e) => {
                warn!("Request failed for text: {}. {}", case.text, e);
                summary.failures.push(FailedCase {
                    text: case.text.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        correct = summary.correct,
        total = summary.total,
        failed = summary.failures.len(),
        "Evaluation finished"
    );
    summary
}
