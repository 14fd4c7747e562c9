//! Error types for import operations

use thiserror::Error;

use crate::canvas::CanvasError;

/// Import error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Nothing to import
    #[error("empty input")]
    EmptyInput,

    /// Explicit format name not recognized
    #[error("unsupported import format: {0:?}")]
    UnsupportedFormat(String),

    /// Native dump failed its magic, dimension or size checks
    #[error("malformed native header: {0}")]
    MalformedHeader(&'static str),

    /// Canvas could not be created
    #[error("allocation failure: {0}")]
    AllocationFailure(#[from] CanvasError),
}

/// Result type for import operations
pub type Result<T> = std::result::Result<T, ImportError>;
