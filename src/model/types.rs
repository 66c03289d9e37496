use crate::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Two-class sentiment label shared by requests, responses and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 2] = [Sentiment::Negative, Sentiment::Positive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Positive => "positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "negative" => Ok(Sentiment::Negative),
            "positive" => Ok(Sentiment::Positive),
            other => Err(Error::validation(format!(
                "unknown sentiment '{}', expected 'positive' or 'negative'",
                other
            ))),
        }
    }
}

/// Output labels the artifact emits for each side of the decision boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelMap {
    #[serde(default = "default_positive")]
    pub positive: String,
    #[serde(default = "default_negative")]
    pub negative: String,
}

impl Default for LabelMap {
    fn default() -> Self {
        Self {
            positive: default_positive(),
            negative: default_negative(),
        }
    }
}

/// Serialized bag-of-words linear classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub labels: LabelMap,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    pub weights: std::collections::HashMap<String, f64>,
}

fn default_positive() -> String {
    "positive".to_string()
}

fn default_negative() -> String {
    "negative".to_string()
}

fn default_lowercase() -> bool {
    true
}
