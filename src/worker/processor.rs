use crate::config::Settings;
use crate::document::{ChunkDispatcher, Document, DocumentLoader, DocumentParser};
use crate::indexing::ChunkSink;
use crate::utils::{Metrics, Timer};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs one document through the full pipeline:
/// validate -> parse -> classify -> chunk -> sink
pub struct DocumentProcessor {
    settings: Settings,
    dispatcher: ChunkDispatcher,
    sink: Arc<dyn ChunkSink>,
    metrics: Metrics,
}

impl DocumentProcessor {
    pub fn new(settings: Settings, sink: Arc<dyn ChunkSink>, metrics: Metrics) -> Self {
        let dispatcher = ChunkDispatcher::new(&settings.chunking, settings.detection.clone());

        Self {
            settings,
            dispatcher,
            sink,
            metrics,
        }
    }

    /// Process a single file, returning the number of chunks indexed
    pub async fn process_file(&self, path: &Path) -> Result<usize> {
        info!("📄 Processing {:?}", path);
        let timer = Timer::new();

        DocumentLoader::validate_file(path, self.settings.worker.max_file_size_mb)?;

        let parsed = DocumentParser::parse(path)?;

        if parsed.content.trim().is_empty() {
            warn!("{} has no extractable text", parsed.filename);
            self.metrics.increment_documents_skipped();
            return Ok(0);
        }

        let document = Document::new(parsed.filename.clone(), parsed.content);
        let chunks = self.dispatcher.chunk(&document);

        if chunks.is_empty() {
            warn!("{} produced no chunks", parsed.filename);
            self.metrics.increment_documents_skipped();
            return Ok(0);
        }

        self.sink.index_chunks(&chunks).await?;

        self.metrics.increment_documents_processed();
        self.metrics.add_chunks_created(chunks.len() as u64);
        self.metrics.add_processing_time(timer.elapsed());

        info!(
            "✅ {} -> {} chunks ({})",
            parsed.filename,
            chunks.len(),
            chunks[0].source_category.as_str()
        );

        Ok(chunks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Category, Chunk};
    use crate::indexing::sink::MockChunkSink;
    use std::io::Write;

    fn settings() -> Settings {
        Settings::default()
    }

    fn write_material(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    fn pad(sentence: &str, target_chars: usize) -> String {
        let mut out = String::new();
        while out.chars().count() < target_chars {
            out.push_str(sentence);
            out.push(' ');
        }
        out
    }

    #[tokio::test]
    async fn test_exam_file_reaches_sink_as_two_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!(
            "1. Prva tema\n{}\n2. Druga tema\n{}",
            pad("Opis prve teme za ispit.", 100),
            pad("Opis druge teme za ispit.", 100),
        );
        let path = write_material(&dir, "ispitna_pitanja.txt", &text);

        let mut sink = MockChunkSink::new();
        sink.expect_index_chunks()
            .withf(|chunks: &[Chunk]| {
                chunks.len() == 2
                    && chunks
                        .iter()
                        .all(|c| c.source_category == Category::ExamQuestions)
            })
            .times(1)
            .returning(|_| Ok(()));

        let processor = DocumentProcessor::new(settings(), Arc::new(sink), Metrics::new());
        let count = processor.process_file(&path).await.unwrap();

        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_empty_file_skips_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_material(&dir, "prazno.txt", "   \n  ");

        let mut sink = MockChunkSink::new();
        sink.expect_index_chunks().times(0);

        let metrics = Metrics::new();
        let processor = DocumentProcessor::new(settings(), Arc::new(sink), metrics.clone());
        let count = processor.process_file(&path).await.unwrap();

        assert_eq!(count, 0);
        assert_eq!(metrics.get_documents_skipped(), 1);
        assert_eq!(metrics.get_documents_processed(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_material(&dir, "slika.png", "not really a png");

        let mut sink = MockChunkSink::new();
        sink.expect_index_chunks().times(0);

        let processor = DocumentProcessor::new(settings(), Arc::new(sink), Metrics::new());
        assert!(processor.process_file(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_metrics_track_successful_run() {
        let dir = tempfile::tempdir().unwrap();
        let text = pad("Dugacak pasus skripte za semanticko deljenje.", 2000);
        let path = write_material(&dir, "skripta_ml.txt", &text);

        let mut sink = MockChunkSink::new();
        sink.expect_index_chunks().returning(|_| Ok(()));

        let metrics = Metrics::new();
        let processor = DocumentProcessor::new(settings(), Arc::new(sink), metrics.clone());
        let count = processor.process_file(&path).await.unwrap();

        assert!(count >= 2);
        assert_eq!(metrics.get_documents_processed(), 1);
        assert_eq!(metrics.get_chunks_created(), count as u64);
    }
}
