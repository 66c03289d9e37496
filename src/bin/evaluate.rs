use anyhow::{Context, Result};
use clap::Parser;
use sentiment_service::{
    evaluation::{self, ApiClient, DEFAULT_API_URL},
    telemetry,
};
use std::path::PathBuf;

/// Evaluate the sentiment analysis API against a labeled test set
#[derive(Parser)]
#[command(name = "sentiment-evaluate")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the test JSON file (array of {"text", "true_label"})
    #[arg(long)]
    test_data: PathBuf,

    /// Base URL of the prediction service
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SENTIMENT_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Stdout carries only the report; the flag is authoritative over RUST_LOG
    telemetry::init_stderr(&cli.log_level)?;

    let cases = evaluation::load_test_set(&cli.test_data)
        .await
        .with_context(|| format!("loading {}", cli.test_data.display()))?;

    let client = ApiClient::new(&cli.api_url);
    let summary = evaluation::evaluate(&client, &cases).await;

    for failure in &summary.failures {
        println!("Request failed for text: {}. {}", failure.text, failure.reason);
    }
    println!("{}", summary);

    Ok(())
}
