use async_trait::async_trait;
use enginefuse_types::{ExecutionPayload, ForkchoiceState, PayloadAttributes, PayloadId, PayloadStatus};
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::errors::ClientResult;

/// Result of `engine_forkchoiceUpdated*`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkchoiceUpdatedResult {
    pub payload_status: PayloadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_id: Option<PayloadId>,
}

/// Result of `engine_getPayload*`: the execution payload envelope plus
/// whatever extra fields (block value, blobs bundle, should-override-builder
/// flag) the backend's Engine-API version adds. The interceptor only ever
/// rewrites `execution_payload`'s hash fields, so the rest travels as an
/// opaque map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPayloadResult {
    pub execution_payload: ExecutionPayload,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// Engine-API methods fanned out to a single backend.
///
/// `EngineMux` calls this trait once per backend per operation; it never
/// assumes anything about which concrete transport or version alias is
/// behind it. Version suffixes (`V1`/`V2`/`V3`) are resolved by the RPC
/// frontend before reaching this layer - every call here is already the V2
/// semantics.
///
/// `#[async_trait]` boxes the returned future as `Send`, which the RPC
/// frontend's server traits require of anything they call into.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EngineClient {
    async fn forkchoice_updated(
        &self,
        state: ForkchoiceState,
        attrs: Option<PayloadAttributes>,
    ) -> ClientResult<ForkchoiceUpdatedResult>;

    async fn get_payload(&self, id: PayloadId) -> ClientResult<GetPayloadResult>;

    async fn new_payload(&self, payload: ExecutionPayload) -> ClientResult<PayloadStatus>;
}
