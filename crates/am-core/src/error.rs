//! Error types for assignment-maker

use thiserror::Error;

/// Main error type for assignment-maker
#[derive(Debug, Error)]
pub enum AmError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Assignment not found
    #[error("Assignment not found: {0}")]
    AssignmentNotFound(String),

    /// Rejected import document
    #[error("Invalid assignment format: {0}")]
    InvalidImport(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// HTML template error
    #[error("Template error: {0}")]
    Template(String),

    /// Archive assembly error
    #[error("Archive error: {0}")]
    Archive(String),

    /// PDF generation error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AmError>,
    },
}

impl AmError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AmError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<tera::Error> for AmError {
    fn from(e: tera::Error) -> Self {
        AmError::Template(e.to_string())
    }
}

impl From<zip::result::ZipError> for AmError {
    fn from(e: zip::result::ZipError) -> Self {
        AmError::Archive(e.to_string())
    }
}

/// Result type alias for assignment-maker
pub type Result<T> = std::result::Result<T, AmError>;
