use thiserror::Error;

/// Errors raised while decoding or validating a wire-level identifier.
#[derive(Debug, Error)]
pub enum TypesError {
    /// A hash or payload ID field was not valid hex.
    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),

    /// A decoded byte string did not match the expected fixed length.
    #[error("expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

impl TypesError {
    pub fn invalid_hex(msg: impl Into<String>) -> Self {
        Self::InvalidHex(msg.into())
    }
}
