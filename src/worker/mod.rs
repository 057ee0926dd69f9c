pub mod processor;

pub use processor::DocumentProcessor;

use crate::config::Settings;
use crate::document::DocumentLoader;
use crate::indexing::ChunkSink;
use crate::utils::Metrics;
use anyhow::Result;
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use walkdir::WalkDir;

/// Walks the materials root and pushes every supported file through the
/// processor. Documents share no state, so they run concurrently.
pub struct IngestWorker {
    settings: Settings,
    processor: Arc<DocumentProcessor>,
    metrics: Metrics,
}

impl IngestWorker {
    pub fn new(settings: Settings, sink: Arc<dyn ChunkSink>) -> Self {
        let metrics = Metrics::new();
        let processor = Arc::new(DocumentProcessor::new(
            settings.clone(),
            sink,
            metrics.clone(),
        ));

        Self {
            settings,
            processor,
            metrics,
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.clone()
    }

    /// Returns the number of documents that produced chunks
    pub async fn run(&self) -> Result<usize> {
        let files = self.collect_files();

        info!(
            "📦 Found {} supported files under {:?}",
            files.len(),
            self.settings.worker.materials_root
        );

        let indexed = stream::iter(files)
            .map(|path| {
                let processor = self.processor.clone();
                let metrics = self.metrics.clone();

                async move {
                    match processor.process_file(&path).await {
                        Ok(count) => count > 0,
                        Err(e) => {
                            error!("❌ Failed to process {:?}: {}", path, e);
                            metrics.increment_documents_failed();
                            false
                        }
                    }
                }
            })
            .buffer_unordered(self.settings.worker.concurrency)
            .filter(|indexed| futures::future::ready(*indexed))
            .count()
            .await;

        info!("🏁 Ingest run complete: {} documents indexed", indexed);

        Ok(indexed)
    }

    /// Sorted walk keeps runs reproducible
    fn collect_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.settings.worker.materials_root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| DocumentLoader::is_supported(path))
            .collect()
    }
}
