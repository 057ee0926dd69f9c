pub mod error;
pub mod logger;
pub mod metrics;

pub use error::IngestError;
pub use metrics::{Metrics, Timer};
