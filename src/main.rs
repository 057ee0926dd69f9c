use std::sync::Arc;

use study_ingest_worker::config::Settings;
use study_ingest_worker::indexing::JsonlSink;
use study_ingest_worker::utils::logger;
use study_ingest_worker::worker::IngestWorker;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logger()?;

    info!("🚀 Starting study material ingest worker...");

    let settings = Settings::load()?;

    let sink = Arc::new(JsonlSink::create(&settings.worker.output_path).await?);
    let worker = IngestWorker::new(settings, sink);

    worker.run().await?;
    worker.metrics().print_summary();

    Ok(())
}
