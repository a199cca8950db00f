//! Error types for the CP/M directory core.

use thiserror::Error;

/// Errors that can occur during directory operations.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File exists: {0}")]
    NameCollision(String),

    #[error("Invalid block number: {0}")]
    InvalidBlock(usize),

    #[error("Invalid directory slot: {0}")]
    InvalidExtent(usize),

    #[error("Block buffer must be exactly one block long")]
    BadBufferSize,

    #[error("Disk image is {actual} bytes, expected {expected}")]
    ImageSize { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FsError {
    /// True for the outcomes a caller is expected to handle (bad name, missing
    /// file, rename target taken), false for storage-side failures.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FsError::InvalidName(_) | FsError::NotFound(_) | FsError::NameCollision(_)
        )
    }
}

/// Result type for directory operations.
pub type FsResult<T> = Result<T, FsError>;
