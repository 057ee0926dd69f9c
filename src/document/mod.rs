pub mod category;
pub mod chunker;
pub mod loader;
pub mod parser;
pub mod splitter;

pub use category::{Category, CategoryClassifier, Detection, DetectionMethod};
pub use chunker::{Chunk, ChunkDispatcher, Document};
pub use loader::DocumentLoader;
pub use parser::{DocumentParser, ParsedDocument};
pub use splitter::{Fragment, SplitStrategy};
