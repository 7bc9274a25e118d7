use std::sync::Arc;

use async_trait::async_trait;
use enginefuse_client::{AppClient, EngineClient, ForkchoiceUpdatedResult, GetPayloadResult};
use enginefuse_engine::EngineMux;
use enginefuse_rpc_api::EngineApiServer;
use enginefuse_types::{ExecutionPayload, ForkchoiceState, PayloadAttributes, PayloadId, PayloadStatus};
use jsonrpsee::core::RpcResult;

use crate::errors::map_engine_mux_error;

/// Implements the `engine_*` namespace by delegating every call to a shared
/// [`EngineMux`].
#[derive(Debug)]
pub struct EngineRpcImpl<E1, E2> {
    mux: Arc<EngineMux<E1, E2>>,
}

impl<E1, E2> EngineRpcImpl<E1, E2> {
    pub fn new(mux: Arc<EngineMux<E1, E2>>) -> Self {
        Self { mux }
    }
}

#[async_trait]
impl<E1, E2> EngineApiServer for EngineRpcImpl<E1, E2>
where
    E1: EngineClient + Send + Sync + 'static,
    E2: EngineClient + AppClient + Send + Sync + 'static,
{
    async fn forkchoice_updated_v1(
        &self,
        fork_choice_state: ForkchoiceState,
        payload_attributes: Option<PayloadAttributes>,
    ) -> RpcResult<ForkchoiceUpdatedResult> {
        self.forkchoice_updated_v2(fork_choice_state, payload_attributes)
            .await
    }

    async fn forkchoice_updated_v2(
        &self,
        fork_choice_state: ForkchoiceState,
        payload_attributes: Option<PayloadAttributes>,
    ) -> RpcResult<ForkchoiceUpdatedResult> {
        self.mux
            .forkchoice_updated(fork_choice_state, payload_attributes)
            .await
            .map_err(map_engine_mux_error)
    }

    async fn forkchoice_updated_v3(
        &self,
        fork_choice_state: ForkchoiceState,
        payload_attributes: Option<PayloadAttributes>,
    ) -> RpcResult<ForkchoiceUpdatedResult> {
        self.forkchoice_updated_v2(fork_choice_state, payload_attributes)
            .await
    }

    async fn get_payload_v1(&self, payload_id: PayloadId) -> RpcResult<ExecutionPayload> {
        let envelope = self
            .mux
            .get_payload(payload_id)
            .await
            .map_err(map_engine_mux_error)?;
        Ok(envelope.execution_payload)
    }

    async fn get_payload_v2(&self, payload_id: PayloadId) -> RpcResult<GetPayloadResult> {
        self.mux
            .get_payload(payload_id)
            .await
            .map_err(map_engine_mux_error)
    }

    async fn get_payload_v3(&self, payload_id: PayloadId) -> RpcResult<GetPayloadResult> {
        self.get_payload_v2(payload_id).await
    }

    async fn new_payload_v1(&self, payload: ExecutionPayload) -> RpcResult<PayloadStatus> {
        self.new_payload_v2(payload).await
    }

    async fn new_payload_v2(&self, payload: ExecutionPayload) -> RpcResult<PayloadStatus> {
        self.mux
            .new_payload(payload)
            .await
            .map_err(map_engine_mux_error)
    }

    async fn new_payload_v3(&self, payload: ExecutionPayload) -> RpcResult<PayloadStatus> {
        self.new_payload_v2(payload).await
    }
}
