use thiserror::Error;

/// Errors raised talking to a downstream execution backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend could not be reached at all (connection refused, DNS
    /// failure, request timeout).
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend responded with a JSON-RPC error object.
    #[error("backend returned an error: {0}")]
    Rpc(String),

    /// The response could not be decoded into the expected shape.
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

impl ClientError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

impl From<jsonrpsee::core::ClientError> for ClientError {
    fn from(err: jsonrpsee::core::ClientError) -> Self {
        match err {
            jsonrpsee::core::ClientError::Call(obj) => Self::rpc(obj.message().to_string()),
            jsonrpsee::core::ClientError::ParseError(e) => Self::malformed(e.to_string()),
            other => Self::unavailable(other.to_string()),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
