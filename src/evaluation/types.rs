use serde::{Deserialize, Serialize};
use std::fmt;

/// One labeled entry of the offline test set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub text: String,
    pub true_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailedCase {
    pub text: String,
    pub reason: String,
}

/// Correct/total tally; failed requests are kept out of both counts.
#[derive(Debug, Clone, Default)]
pub struct EvaluationSummary {
    pub correct: usize,
    pub total: usize,
    pub failures: Vec<FailedCase>,
}

impl EvaluationSummary {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

impl fmt::Display for EvaluationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Accuracy: {:.2}% ({}/{})",
            self.accuracy() * 100.0,
            self.correct,
            self.total
        )
    }
}
