use anyhow::Result;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub fn init_logger() -> Result<()> {
    // Get log level from environment (default: info)
    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,study_ingest_worker=debug".to_string());

    // Get log format from environment (default: pretty)
    let log_format = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "pretty".to_string());

    // Create file appender (logs/ingest.log, daily rotation)
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("ingest")
        .filename_suffix("log")
        .build("logs")?;

    // Create filter
    let filter = EnvFilter::try_new(&log_level)?;

    // Setup subscriber (json untuk production, pretty untuk development)
    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stdout))
            .with(fmt::layer().json().with_writer(file_appender))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stdout))
            .with(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false), // No colors in file
            )
            .init();
    }

    Ok(())
}
