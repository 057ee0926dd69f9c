pub mod jsonl;
pub mod sink;

pub use jsonl::JsonlSink;
pub use sink::ChunkSink;
