//! Drift and feedback statistics behind the monitoring dashboard.

use crate::prediction_log::LogRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Two overlaid histograms sharing the same bin edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub reference: Vec<usize>,
    pub logged: Vec<usize>,
}

impl Histogram {
    pub fn bins(&self) -> usize {
        self.reference.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthDrift {
    pub reference_mean: Option<f64>,
    pub logged_mean: Option<f64>,
    pub histogram: Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelShare {
    pub label: String,
    pub predicted: f64,
    pub reference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackMetrics {
    pub samples: usize,
    pub accuracy: f64,
    pub precision: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyAlert {
    pub accuracy: f64,
    pub threshold: f64,
    pub message: String,
}

/// Character count, not byte count.
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

pub fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<usize>() as f64 / values.len() as f64)
}

/// Bins both series over their combined range. `bins` must be positive.
pub fn histogram(reference: &[usize], logged: &[usize], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let all = reference.iter().chain(logged.iter()).copied();
    let (min, max) = all.fold((usize::MAX, 0usize), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let (lo, hi) = if min > max {
        (0.0, 1.0)
    } else if min == max {
        // Degenerate range: center a unit-wide span on the single value
        (min as f64 - 0.5, max as f64 + 0.5)
    } else {
        (min as f64, max as f64)
    };
    let width = (hi - lo) / bins as f64;
    let edges = (0..=bins).map(|i| lo + width * i as f64).collect();

    let count = |values: &[usize]| {
        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v as f64 - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }
        counts
    };

    Histogram {
        edges,
        reference: count(reference),
        logged: count(logged),
    }
}

pub fn length_drift(reference_texts: &[&str], logged_texts: &[&str], bins: usize) -> LengthDrift {
    let reference: Vec<usize> = reference_texts.iter().map(|t| text_length(t)).collect();
    let logged: Vec<usize> = logged_texts.iter().map(|t| text_length(t)).collect();

    LengthDrift {
        reference_mean: mean(&reference),
        logged_mean: mean(&logged),
        histogram: histogram(&reference, &logged, bins),
    }
}

/// Normalized label frequencies; an empty input yields an empty map.
pub fn label_distribution<'a>(labels: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label.to_string()).or_default() += 1;
    }

    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(label, n)| (label, n as f64 / total as f64))
        .collect()
}

/// Aligns both distributions on the union of their labels, filling gaps with zero.
pub fn target_drift(
    predicted: &BTreeMap<String, f64>,
    reference: &BTreeMap<String, f64>,
) -> Vec<LabelShare> {
    let labels: BTreeSet<&String> = predicted.keys().chain(reference.keys()).collect();
    labels
        .into_iter()
        .map(|label| LabelShare {
            label: label.clone(),
            predicted: predicted.get(label).copied().unwrap_or(0.0),
            reference: reference.get(label).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Accuracy and support-weighted precision over records carrying ground truth.
///
/// Returns `None` when no record has feedback. A label that is never
/// predicted contributes a precision of zero.
pub fn feedback_metrics(records: &[LogRecord]) -> Option<FeedbackMetrics> {
    let pairs: Vec<(&str, &str)> = records
        .iter()
        .filter(|r| r.has_feedback())
        .filter_map(|r| {
            r.true_sentiment
                .as_deref()
                .map(|truth| (truth, r.predicted_sentiment.as_str()))
        })
        .collect();

    if pairs.is_empty() {
        return None;
    }

    let samples = pairs.len();
    let correct = pairs.iter().filter(|(t, p)| t == p).count();

    let labels: BTreeSet<&str> = pairs.iter().flat_map(|(t, p)| [*t, *p]).collect();
    let weighted: f64 = labels
        .iter()
        .map(|label| {
            let support = pairs.iter().filter(|(t, _)| t == label).count();
            let predicted = pairs.iter().filter(|(_, p)| p == label).count();
            let true_positive = pairs.iter().filter(|(t, p)| t == label && p == label).count();
            let precision = if predicted == 0 {
                0.0
            } else {
                true_positive as f64 / predicted as f64
            };
            precision * support as f64
        })
        .sum();

    Some(FeedbackMetrics {
        samples,
        accuracy: correct as f64 / samples as f64,
        precision: weighted / samples as f64,
    })
}

pub fn accuracy_alert(metrics: &FeedbackMetrics, threshold: f64) -> Option<AccuracyAlert> {
    if metrics.accuracy >= threshold {
        return None;
    }
    Some(AccuracyAlert {
        accuracy: metrics.accuracy,
        threshold,
        message: format!(
            "ALERT: the model accuracy has dropped below {:.0}%",
            threshold * 100.0
        ),
    })
}
