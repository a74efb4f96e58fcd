use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid input")]
    Invalid,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Text extraction failed: {0}")]
    ExtractionError(String),

    #[error("Model call failed: {0}")]
    ModelCallError(String),

    #[error("Object storage error: {0}")]
    ObjectStorageError(String),

    #[error("Internal server error")]
    InternalServerError,
}
