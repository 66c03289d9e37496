use crate::model::Sentiment;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One served prediction, as persisted in the NDJSON log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Lines written by other producers may carry a naive or unparsable
    /// timestamp, or none at all; those records are still kept.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    pub request_text: String,
    pub predicted_sentiment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_sentiment: Option<String>,
}

impl LogRecord {
    pub fn new(request_text: String, predicted: Sentiment, truth: Sentiment) -> Self {
        Self {
            timestamp: Some(Utc::now()),
            request_text,
            predicted_sentiment: predicted.to_string(),
            true_sentiment: Some(truth.to_string()),
        }
    }

    pub fn has_feedback(&self) -> bool {
        self.true_sentiment
            .as_deref()
            .is_some_and(|truth| !truth.is_empty())
    }
}

/// RFC 3339 first, then a zone-less ISO 8601 stamp read as UTC.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_str).and_then(parse_timestamp))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Result of reading the whole log: parsed records plus how many lines were dropped.
#[derive(Debug, Clone, Default)]
pub struct LogSnapshot {
    pub records: Vec<LogRecord>,
    pub skipped_lines: usize,
}

impl LogSnapshot {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T10:00:00.000000"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_record_without_timestamp_round_trips() {
        let record: LogRecord =
            serde_json::from_str(r#"{"request_text":"t","predicted_sentiment":"negative"}"#).unwrap();
        assert_eq!(record.timestamp, None);
        let encoded = serde_json::to_string(&record).unwrap();
        assert!(!encoded.contains("timestamp"));
    }
}
