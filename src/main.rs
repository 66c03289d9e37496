use anyhow::Result;
use sentiment_service::{config, server, telemetry};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Determine log level: environment variable overrides config
    let log_level = telemetry::resolve_log_level(&config.server.logs.level);
    if let Err(e) = telemetry::init(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!("Starting sentiment prediction service with log level: {}", log_level);

    // Model load failures land here and stop the process before it binds
    if let Err(e) = server::run(config).await {
        error!("Prediction service stopped: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
