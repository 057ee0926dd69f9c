use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large: {0} MB (max: {1} MB)")]
    FileTooLarge(u64, u64),

    #[error("Parsing error: {0}")]
    ParsingError(String),

    #[error("Indexing error: {0}")]
    IndexingError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for IngestError {
    fn from(err: anyhow::Error) -> Self {
        IngestError::Unknown(err.to_string())
    }
}
