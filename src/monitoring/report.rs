use super::{
    metrics::{
        accuracy_alert, feedback_metrics, label_distribution, length_drift, target_drift,
        AccuracyAlert, FeedbackMetrics, LabelShare, LengthDrift,
    },
    reference::ReferenceRow,
};
use crate::{config::DashboardConfig, prediction_log::LogSnapshot};
use serde::Serialize;

pub const NO_DATA_NOTICE: &str = "No log data found yet";
pub const NO_FEEDBACK_NOTICE: &str = "No user feedback yet to calculate performance";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportSettings {
    pub accuracy_threshold: f64,
    pub histogram_bins: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            accuracy_threshold: 0.8,
            histogram_bins: 30,
        }
    }
}

impl From<&DashboardConfig> for ReportSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            accuracy_threshold: config.accuracy_threshold,
            histogram_bins: config.histogram_bins,
        }
    }
}

/// Everything the dashboard shows, derived from one read of the log and reference data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub settings: ReportSettings,
    pub skipped_lines: usize,
    /// `None` when the log holds no records; nothing else is computed then.
    pub analysis: Option<Analysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub entries: usize,
    pub length_drift: LengthDrift,
    pub target_drift: Vec<LabelShare>,
    /// `None` when no record carries ground truth.
    pub performance: Option<FeedbackMetrics>,
    pub alert: Option<AccuracyAlert>,
}

impl DashboardReport {
    pub fn has_data(&self) -> bool {
        self.analysis.is_some()
    }

    pub fn alert(&self) -> Option<&AccuracyAlert> {
        self.analysis.as_ref().and_then(|a| a.alert.as_ref())
    }

    pub fn notice(&self) -> Option<&'static str> {
        match &self.analysis {
            None => Some(NO_DATA_NOTICE),
            Some(a) if a.performance.is_none() => Some(NO_FEEDBACK_NOTICE),
            Some(_) => None,
        }
    }
}

/// Builds the report from scratch. Same inputs, same report.
pub fn build_report(
    logs: &LogSnapshot,
    reference: &[ReferenceRow],
    settings: ReportSettings,
) -> DashboardReport {
    if logs.is_empty() {
        return DashboardReport {
            settings,
            skipped_lines: logs.skipped_lines,
            analysis: None,
        };
    }

    let logged_texts: Vec<&str> = logs.records.iter().map(|r| r.request_text.as_str()).collect();
    let reference_texts: Vec<&str> = reference.iter().map(|r| r.review.as_str()).collect();

    let predicted = label_distribution(logs.records.iter().map(|r| r.predicted_sentiment.as_str()));
    let trained = label_distribution(reference.iter().map(|r| r.sentiment.as_str()));

    let performance = feedback_metrics(&logs.records);
    let alert = performance
        .as_ref()
        .and_then(|m| accuracy_alert(m, settings.accuracy_threshold));

    DashboardReport {
        settings,
        skipped_lines: logs.skipped_lines,
        analysis: Some(Analysis {
            entries: logs.len(),
            length_drift: length_drift(&reference_texts, &logged_texts, settings.histogram_bins),
            target_drift: target_drift(&predicted, &trained),
            performance,
            alert,
        }),
    }
}
