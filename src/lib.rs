pub mod config;
pub mod document;
pub mod indexing;
pub mod utils;
pub mod worker;

pub use config::Settings;
pub use document::{Category, Chunk, ChunkDispatcher, Document};
pub use utils::error::IngestError;
