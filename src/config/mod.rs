mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config = match tokio::fs::read_to_string(&config_path).await {
        Ok(config_str) => parse(&config_str)?,
        // Only the implicit default file may be absent
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && explicit_path.is_none() => {
            debug!("No {} found, using built-in defaults", config_path);
            Config::default()
        }
        Err(e) => {
            return Err(Error::config(format!(
                "failed to read {}: {}",
                config_path, e
            )));
        }
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(config_str)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let threshold = config.dashboard.accuracy_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(Error::config(format!(
            "dashboard.accuracy_threshold must be within [0, 1], got {}",
            threshold
        )));
    }
    if config.dashboard.histogram_bins == 0 {
        return Err(Error::config("dashboard.histogram_bins must be positive"));
    }
    Ok(())
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(path) = env::var("MODEL_PATH") {
        config.model.path = path;
    }
    if let Ok(path) = env::var("PREDICTION_LOG_PATH") {
        config.prediction_log.path = path;
    }
    if let Ok(path) = env::var("REFERENCE_DATA_PATH") {
        config.dashboard.reference_path = path;
    }
}
