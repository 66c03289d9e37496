pub mod config;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod monitoring;
pub mod prediction_log;
pub mod server;
pub mod telemetry;

pub use error::{Error, Result};
