use braid_substrate::SubstrateError;
use braid_types::ContentId;

/// Errors from comment operations.
///
/// `MalformedPayload` and `NotFound` are surfaced distinctly so a caller can
/// tell corrupt data from missing data.
#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    /// Decode-time schema violation in a stored payload.
    #[error("malformed comment payload: {0}")]
    MalformedPayload(String),

    /// The identifier does not resolve in the substrate.
    #[error("comment not found: {0}")]
    NotFound(ContentId),

    /// A substrate create, save, or append failed.
    #[error("storage write failed: {0}")]
    StorageWrite(#[source] SubstrateError),

    /// Reply index beyond the current list length.
    #[error("reply index {index} out of range (length {length})")]
    IndexOutOfRange { index: u64, length: u64 },

    /// Identity resolution found no active display name.
    #[error("no display name is configured for the current user")]
    NoUserName,

    /// Substrate read failure that is neither absence nor a write rejection.
    #[error(transparent)]
    Substrate(SubstrateError),
}

impl CommentError {
    /// Classify a substrate error raised on a read path.
    pub(crate) fn from_read(err: SubstrateError) -> Self {
        match err {
            SubstrateError::NotFound(id) => Self::NotFound(id),
            SubstrateError::IndexOutOfRange { index, length } => {
                Self::IndexOutOfRange { index, length }
            }
            other => Self::Substrate(other),
        }
    }

    /// Classify a substrate error raised on a write path.
    pub(crate) fn from_write(err: SubstrateError) -> Self {
        Self::StorageWrite(err)
    }
}

/// Result alias for comment operations.
pub type CommentResult<T> = Result<T, CommentError>;
