pub mod settings;

pub use settings::{ChunkingConfig, DetectionConfig, Settings, WorkerConfig};
