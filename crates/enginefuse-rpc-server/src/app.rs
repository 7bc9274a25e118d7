use std::sync::Arc;

use async_trait::async_trait;
use enginefuse_rpc_api::{CosmosApiServer, SendTransactionResult};
use enginefuse_store::MsgBuf;
use jsonrpsee::{
    core::RpcResult,
    types::{error::INVALID_PARAMS_CODE, ErrorObjectOwned},
};

/// Fixed empty-protobuf-message placeholder payloads for the four
/// no-argument channel-handshake variants, distinct enough that draining
/// `MsgBuf` can still tell which handshake step was requested.
const CHAN_OPEN_INIT: &[u8] = b"ibc.core.channel.v1.MsgChannelOpenInit";
const CHAN_OPEN_TRY: &[u8] = b"ibc.core.channel.v1.MsgChannelOpenTry";
const CHAN_OPEN_ACK: &[u8] = b"ibc.core.channel.v1.MsgChannelOpenAck";
const CHAN_OPEN_CONFIRM: &[u8] = b"ibc.core.channel.v1.MsgChannelOpenConfirm";

/// Implements the `cosmos_*` namespace: every method here only ever queues
/// into [`MsgBuf`]. Queuing is the only effect; nothing is executed
/// until the next `forkchoiceUpdated` drains the buffer into `EE2`.
#[derive(Debug)]
pub struct AppMsg {
    msg_buf: Arc<MsgBuf>,
}

impl AppMsg {
    pub fn new(msg_buf: Arc<MsgBuf>) -> Self {
        Self { msg_buf }
    }
}

#[async_trait]
impl CosmosApiServer for AppMsg {
    async fn send_transaction(&self, tx: String) -> RpcResult<SendTransactionResult> {
        let stripped = tx.strip_prefix("0x").unwrap_or(&tx);
        let bytes = hex::decode(stripped)
            .map_err(|e| ErrorObjectOwned::owned(INVALID_PARAMS_CODE, e.to_string(), None::<()>))?;
        self.msg_buf.append(bytes);
        Ok(SendTransactionResult::default())
    }

    async fn chan_open_init(&self) -> RpcResult<()> {
        self.msg_buf.append(CHAN_OPEN_INIT.to_vec());
        Ok(())
    }

    async fn chan_open_try(&self) -> RpcResult<()> {
        self.msg_buf.append(CHAN_OPEN_TRY.to_vec());
        Ok(())
    }

    async fn chan_open_ack(&self) -> RpcResult<()> {
        self.msg_buf.append(CHAN_OPEN_ACK.to_vec());
        Ok(())
    }

    async fn chan_open_confirm(&self) -> RpcResult<()> {
        self.msg_buf.append(CHAN_OPEN_CONFIRM.to_vec());
        Ok(())
    }
}
