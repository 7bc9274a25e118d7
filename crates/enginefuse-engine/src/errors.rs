use enginefuse_client::ClientError;
use enginefuse_store::StoreError;
use thiserror::Error;

/// Errors raised by `EngineMux`, the fan-out/fusion state machine.
///
/// These are mapped to Engine-API-shaped JSON-RPC errors one layer up, in
/// `enginefuse-rpc-server`; this crate stays transport-agnostic.
#[derive(Debug, Error)]
pub enum EngineMuxError {
    /// A fork-choice update with a zero head hash: there is no chain to
    /// choose, so the call is rejected before either backend or store is
    /// touched. Mirrors the real Engine-API's `InvalidForkchoiceState` rule.
    #[error("forkchoice state is empty: a zero head hash cannot drive a fork choice decision")]
    EmptyForkchoiceState,

    /// A composite identifier handed in by the driver has no recorded
    /// preimage.
    #[error("composite identifier has no recorded preimage: {0}")]
    DefuseMiss(#[from] StoreError),

    /// `getPayload` was called for a composite payload ID whose EE1 side was
    /// never recorded (no build was ever requested of EE1 for this ID).
    #[error("getPayload requires an EE1 payload id, but the composite payload recorded none")]
    MissingEe1PayloadId,

    /// EE1 is authoritative: any failure talking to it aborts the call.
    #[error("EE1 backend call failed: {0}")]
    Ee1Unavailable(#[source] ClientError),
}

impl EngineMuxError {
    pub fn ee1_unavailable(err: ClientError) -> Self {
        Self::Ee1Unavailable(err)
    }
}
