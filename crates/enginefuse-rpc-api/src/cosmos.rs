use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use serde::{Deserialize, Serialize};

/// Acknowledges a queued `cosmos_sendTransaction`; queuing only, not
/// execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTransactionResult {}

/// The `cosmos_*` namespace: opaque application-layer messages bound for
/// `EE2`, buffered in `MsgBuf` until the next fork-choice boundary.
///
/// The four `chanOpen*` variants take no parameters - each marshals a fixed
/// empty protobuf message.
#[rpc(server, namespace = "cosmos")]
pub trait CosmosApi {
    #[method(name = "sendTransaction")]
    async fn send_transaction(&self, tx: String) -> RpcResult<SendTransactionResult>;

    #[method(name = "chanOpenInit")]
    async fn chan_open_init(&self) -> RpcResult<()>;

    #[method(name = "chanOpenTry")]
    async fn chan_open_try(&self) -> RpcResult<()>;

    #[method(name = "chanOpenAck")]
    async fn chan_open_ack(&self) -> RpcResult<()>;

    #[method(name = "chanOpenConfirm")]
    async fn chan_open_confirm(&self) -> RpcResult<()>;
}
