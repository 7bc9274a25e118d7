use thiserror::Error;

/// Top-level startup failures, each mapped to a non-zero process exit.
#[derive(Debug, Error)]
pub(crate) enum InitError {
    #[error(transparent)]
    Config(#[from] enginefuse_config::ConfigError),

    #[error("failed to build {backend} client: {source}")]
    Client {
        backend: &'static str,
        #[source]
        source: enginefuse_client::ClientError,
    },

    #[error("failed to start RPC frontend on {addr}: {source}")]
    Server {
        addr: String,
        #[source]
        source: anyhow::Error,
    },
}
