//! Error types raised by repository implementations.

use thiserror::Error;

use super::SaveSlot;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("no {0} save found")]
    NotFound(SaveSlot),

    #[error("no saved game was loaded")]
    NothingToResume,
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
