use thiserror::Error;

/// Errors raised by document stores
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize design: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to access design storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("No saved design with id {0}")]
    NotFound(String),

    #[error("Invalid design data: {0}")]
    InvalidDocument(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors raised while exporting a design to an image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Canvas has zero width or height")]
    EmptyCanvas,

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
}
