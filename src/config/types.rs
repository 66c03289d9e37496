use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub prediction_log: PredictionLogConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionLogConfig {
    #[serde(default = "default_prediction_log_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_dashboard_port")]
    pub port: u16,
    #[serde(default = "default_reference_path")]
    pub reference_path: String,
    #[serde(default = "default_accuracy_threshold")]
    pub accuracy_threshold: f64,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

impl Default for PredictionLogConfig {
    fn default() -> Self {
        Self {
            path: default_prediction_log_path(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_dashboard_port(),
            reference_path: default_reference_path(),
            accuracy_threshold: default_accuracy_threshold(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_dashboard_port() -> u16 {
    8501
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_path() -> String {
    "sentiment_model.json".to_string()
}

fn default_prediction_log_path() -> String {
    "/logs/prediction_logs.json".to_string()
}

fn default_reference_path() -> String {
    "IMDB Dataset.csv".to_string()
}

fn default_accuracy_threshold() -> f64 {
    0.8
}

fn default_histogram_bins() -> usize {
    30
}
