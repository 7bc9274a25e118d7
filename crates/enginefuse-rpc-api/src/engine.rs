use enginefuse_client::{ForkchoiceUpdatedResult, GetPayloadResult};
use enginefuse_types::{ExecutionPayload, ForkchoiceState, PayloadAttributes, PayloadId, PayloadStatus};
use jsonrpsee::{core::RpcResult, proc_macros::rpc};

/// The `engine_*` namespace the driver speaks to.
///
/// `V1`/`V3` are accepted alongside `V2` and forward to the same semantics;
/// only `getPayloadV1` differs in its response shape, returning the bare
/// [`ExecutionPayload`] instead of the full envelope.
#[rpc(server, namespace = "engine")]
pub trait EngineApi {
    #[method(name = "forkchoiceUpdatedV1")]
    async fn forkchoice_updated_v1(
        &self,
        fork_choice_state: ForkchoiceState,
        payload_attributes: Option<PayloadAttributes>,
    ) -> RpcResult<ForkchoiceUpdatedResult>;

    #[method(name = "forkchoiceUpdatedV2")]
    async fn forkchoice_updated_v2(
        &self,
        fork_choice_state: ForkchoiceState,
        payload_attributes: Option<PayloadAttributes>,
    ) -> RpcResult<ForkchoiceUpdatedResult>;

    #[method(name = "forkchoiceUpdatedV3")]
    async fn forkchoice_updated_v3(
        &self,
        fork_choice_state: ForkchoiceState,
        payload_attributes: Option<PayloadAttributes>,
    ) -> RpcResult<ForkchoiceUpdatedResult>;

    #[method(name = "getPayloadV1")]
    async fn get_payload_v1(&self, payload_id: PayloadId) -> RpcResult<ExecutionPayload>;

    #[method(name = "getPayloadV2")]
    async fn get_payload_v2(&self, payload_id: PayloadId) -> RpcResult<GetPayloadResult>;

    #[method(name = "getPayloadV3")]
    async fn get_payload_v3(&self, payload_id: PayloadId) -> RpcResult<GetPayloadResult>;

    #[method(name = "newPayloadV1")]
    async fn new_payload_v1(&self, payload: ExecutionPayload) -> RpcResult<PayloadStatus>;

    #[method(name = "newPayloadV2")]
    async fn new_payload_v2(&self, payload: ExecutionPayload) -> RpcResult<PayloadStatus>;

    #[method(name = "newPayloadV3")]
    async fn new_payload_v3(&self, payload: ExecutionPayload) -> RpcResult<PayloadStatus>;
}
