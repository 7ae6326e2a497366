//! Error types for the document and credential stores.

/// Errors that can occur when working with the file-backed stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Document missing from the managed directory
    #[error("no such document: {0}")]
    NotFound(String),

    /// Name is empty or would escape the managed directory
    #[error("invalid document name: {0:?}")]
    InvalidName(String),

    /// Credential file exists but cannot be parsed
    #[error("malformed credential file: {0}")]
    MalformedCredentials(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
