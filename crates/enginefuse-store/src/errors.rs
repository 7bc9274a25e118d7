use enginefuse_types::Hash;
use thiserror::Error;

/// Errors raised while resolving a composite identifier back to its
/// per-backend constituents.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The composite hash has never been recorded by this process.
    #[error("no block recorded for composite hash {0}")]
    UnknownBlock(Hash),

    /// The composite payload ID has never been recorded by this process.
    #[error("no payload recorded for composite payload id {0}")]
    UnknownPayload(enginefuse_types::PayloadId),
}

impl StoreError {
    pub fn unknown_block(hash: Hash) -> Self {
        Self::UnknownBlock(hash)
    }

    pub fn unknown_payload(id: enginefuse_types::PayloadId) -> Self {
        Self::UnknownPayload(id)
    }
}
