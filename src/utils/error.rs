use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("OpenAlex request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip export failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("No author found for {query}")]
    AuthorNotFound { query: String },

    #[error("Ambiguous author query \"{query}\": {} candidates", .candidates.len())]
    AmbiguousAuthor {
        query: String,
        candidates: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, TrackerError>;
