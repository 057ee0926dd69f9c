use crate::document::Chunk;
use anyhow::Result;
use async_trait::async_trait;

/// Seam for the external indexing collaborator (vector store,
/// embedding pipeline). Chunks are handed over in document order; the
/// worker retains no ownership after this call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChunkSink: Send + Sync {
    async fn index_chunks(&self, chunks: &[Chunk]) -> Result<()>;
}
