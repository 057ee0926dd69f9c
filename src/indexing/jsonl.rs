use crate::document::Chunk;
use crate::indexing::ChunkSink;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Serialize)]
struct ChunkRecord<'a> {
    text: &'a str,
    source_category: &'a str,
    source_filename: &'a str,
    sequence_index: usize,
    topic_label: Option<&'a str>,
    char_count: usize,
    ingested_at: DateTime<Utc>,
}

/// File-based stand-in for the vector store: one JSON record per chunk,
/// appended per document. The embedding pipeline tails this file.
pub struct JsonlSink {
    file: Mutex<File>,
}

impl JsonlSink {
    pub async fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl ChunkSink for JsonlSink {
    async fn index_chunks(&self, chunks: &[Chunk]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let ingested_at = Utc::now();
        let mut buffer = String::new();

        for chunk in chunks {
            let record = ChunkRecord {
                text: &chunk.text,
                source_category: chunk.source_category.as_str(),
                source_filename: &chunk.source_filename,
                sequence_index: chunk.sequence_index,
                topic_label: chunk.topic_label.as_deref(),
                char_count: chunk.char_count,
                ingested_at,
            };
            buffer.push_str(&serde_json::to_string(&record)?);
            buffer.push('\n');
        }

        let mut file = self.file.lock().await;
        file.write_all(buffer.as_bytes()).await?;
        file.flush().await?;

        debug!("💾 Indexed {} chunks", chunks.len());

        Ok(())
    }
}
