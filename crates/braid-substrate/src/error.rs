use braid_types::ContentId;

/// Errors from substrate operations.
#[derive(Debug, thiserror::Error)]
pub enum SubstrateError {
    /// The identifier does not resolve to a stored unit.
    #[error("storage unit not found: {0}")]
    NotFound(ContentId),

    /// Indexed list access beyond the current length.
    #[error("list index {index} out of range (length {length})")]
    IndexOutOfRange { index: u64, length: u64 },

    /// A create, save, or append was rejected by the backend.
    #[error("storage write failed: {0}")]
    WriteFailed(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for substrate operations.
pub type SubstrateResult<T> = Result<T, SubstrateError>;
