/// Core error types for Lesson Player
use thiserror::Error;

/// Result type alias using `LessonError`
pub type Result<T> = std::result::Result<T, LessonError>;

/// Core error type for Lesson Player
#[derive(Error, Debug)]
pub enum LessonError {
    /// Catalog document could not be parsed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Lesson not found
    #[error("Lesson not found: {0}")]
    LessonNotFound(String),

    /// Invalid URL or URL template
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl LessonError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<url::ParseError> for LessonError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
