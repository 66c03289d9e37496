use anyhow::Result;
use sentiment_service::{config, monitoring, telemetry};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = telemetry::resolve_log_level(&config.server.logs.level);
    if let Err(e) = telemetry::init(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!("Starting monitoring dashboard with log level: {}", log_level);

    if let Err(e) = monitoring::server::run(config).await {
        error!("Monitoring dashboard stopped: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
