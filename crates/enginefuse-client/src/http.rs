use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use enginefuse_types::{
    ExecutionPayload, ForkchoiceState, Hash, PayloadAttributes, PayloadId, PayloadStatus,
};
use jsonrpsee::{
    core::client::ClientT,
    http_client::{transport::HttpBackend, HttpClient, HttpClientBuilder},
    rpc_params,
};
use reth_rpc_layer::{AuthClientLayer, AuthClientService, JwtSecret};

use crate::{
    app::AppClient,
    engine::{EngineClient, ForkchoiceUpdatedResult, GetPayloadResult},
    errors::{ClientError, ClientResult},
    eth::{BlockLookup, EthPassThrough},
};

fn authed_http_client(
    url: &str,
    secret: JwtSecret,
    request_timeout: Duration,
) -> ClientResult<HttpClient<AuthClientService<HttpBackend>>> {
    let middleware = tower::ServiceBuilder::new().layer(AuthClientLayer::new(secret));
    HttpClientBuilder::default()
        .set_http_middleware(middleware)
        .request_timeout(request_timeout)
        .build(url)
        .map_err(|e| ClientError::unavailable(e.to_string()))
}

fn plain_http_client(url: &str, request_timeout: Duration) -> ClientResult<HttpClient<HttpBackend>> {
    HttpClientBuilder::default()
        .request_timeout(request_timeout)
        .build(url)
        .map_err(|e| ClientError::unavailable(e.to_string()))
}

/// The EE1 (EVM-like) backend link: JWT-authenticated over HTTP, matching
/// how the upstream driver's own geth link is constructed.
#[derive(Debug, Clone)]
pub struct Ee1Client {
    inner: Arc<HttpClient<AuthClientService<HttpBackend>>>,
}

impl Ee1Client {
    pub fn new(url: &str, secret: JwtSecret, request_timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            inner: Arc::new(authed_http_client(url, secret, request_timeout)?),
        })
    }
}

#[async_trait]
impl EngineClient for Ee1Client {
    async fn forkchoice_updated(
        &self,
        state: ForkchoiceState,
        attrs: Option<PayloadAttributes>,
    ) -> ClientResult<ForkchoiceUpdatedResult> {
        Ok(self
            .inner
            .request("engine_forkchoiceUpdatedV2", rpc_params![state, attrs])
            .await?)
    }

    async fn get_payload(&self, id: PayloadId) -> ClientResult<GetPayloadResult> {
        Ok(self
            .inner
            .request("engine_getPayloadV2", rpc_params![id])
            .await?)
    }

    async fn new_payload(&self, payload: ExecutionPayload) -> ClientResult<PayloadStatus> {
        Ok(self
            .inner
            .request("engine_newPayloadV2", rpc_params![payload])
            .await?)
    }
}

#[async_trait]
impl BlockLookup for Ee1Client {
    async fn get_block_by_number(
        &self,
        tag: serde_json::Value,
        full: bool,
    ) -> ClientResult<Option<serde_json::Value>> {
        Ok(self
            .inner
            .request("eth_getBlockByNumber", rpc_params![tag, full])
            .await?)
    }

    async fn get_block_by_hash(
        &self,
        hash: Hash,
        full: bool,
    ) -> ClientResult<Option<serde_json::Value>> {
        Ok(self
            .inner
            .request("eth_getBlockByHash", rpc_params![hash, full])
            .await?)
    }
}

#[async_trait]
impl EthPassThrough for Ee1Client {
    async fn chain_id(&self) -> ClientResult<serde_json::Value> {
        Ok(self.inner.request("eth_chainId", rpc_params![]).await?)
    }

    async fn get_proof(
        &self,
        address: serde_json::Value,
        storage_keys: Vec<serde_json::Value>,
        block: serde_json::Value,
    ) -> ClientResult<serde_json::Value> {
        Ok(self
            .inner
            .request("eth_getProof", rpc_params![address, storage_keys, block])
            .await?)
    }

    async fn get_transaction_receipt(
        &self,
        hash: Hash,
    ) -> ClientResult<Option<serde_json::Value>> {
        Ok(self
            .inner
            .request("eth_getTransactionReceipt", rpc_params![hash])
            .await?)
    }

    async fn get_code(
        &self,
        address: serde_json::Value,
        block: serde_json::Value,
    ) -> ClientResult<serde_json::Value> {
        Ok(self
            .inner
            .request("eth_getCode", rpc_params![address, block])
            .await?)
    }

    async fn estimate_gas(
        &self,
        call: serde_json::Value,
        block: Option<serde_json::Value>,
    ) -> ClientResult<serde_json::Value> {
        Ok(self
            .inner
            .request("eth_estimateGas", rpc_params![call, block])
            .await?)
    }

    async fn get_transaction_count(
        &self,
        address: serde_json::Value,
        block: serde_json::Value,
    ) -> ClientResult<serde_json::Value> {
        Ok(self
            .inner
            .request("eth_getTransactionCount", rpc_params![address, block])
            .await?)
    }

    async fn call(
        &self,
        call: serde_json::Value,
        block: Option<serde_json::Value>,
    ) -> ClientResult<serde_json::Value> {
        Ok(self.inner.request("eth_call", rpc_params![call, block]).await?)
    }

    async fn send_raw_transaction(&self, raw: serde_json::Value) -> ClientResult<Hash> {
        Ok(self
            .inner
            .request("eth_sendRawTransaction", rpc_params![raw])
            .await?)
    }

    async fn max_priority_fee_per_gas(&self) -> ClientResult<serde_json::Value> {
        Ok(self
            .inner
            .request("eth_maxPriorityFeePerGas", rpc_params![])
            .await?)
    }
}

/// The EE2 (application-chain) backend link: unauthenticated HTTP, matching
/// how the upstream driver talks to its sibling ABCI engine.
#[derive(Debug, Clone)]
pub struct Ee2Client {
    inner: Arc<HttpClient<HttpBackend>>,
}

impl Ee2Client {
    pub fn new(url: &str, request_timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            inner: Arc::new(plain_http_client(url, request_timeout)?),
        })
    }
}

#[async_trait]
impl EngineClient for Ee2Client {
    async fn forkchoice_updated(
        &self,
        state: ForkchoiceState,
        attrs: Option<PayloadAttributes>,
    ) -> ClientResult<ForkchoiceUpdatedResult> {
        Ok(self
            .inner
            .request("engine_forkchoiceUpdatedV2", rpc_params![state, attrs])
            .await?)
    }

    async fn get_payload(&self, id: PayloadId) -> ClientResult<GetPayloadResult> {
        Ok(self
            .inner
            .request("engine_getPayloadV2", rpc_params![id])
            .await?)
    }

    async fn new_payload(&self, payload: ExecutionPayload) -> ClientResult<PayloadStatus> {
        Ok(self
            .inner
            .request("engine_newPayloadV2", rpc_params![payload])
            .await?)
    }
}

#[async_trait]
impl BlockLookup for Ee2Client {
    async fn get_block_by_number(
        &self,
        tag: serde_json::Value,
        full: bool,
    ) -> ClientResult<Option<serde_json::Value>> {
        Ok(self
            .inner
            .request("eth_getBlockByNumber", rpc_params![tag, full])
            .await?)
    }

    async fn get_block_by_hash(
        &self,
        hash: Hash,
        full: bool,
    ) -> ClientResult<Option<serde_json::Value>> {
        Ok(self
            .inner
            .request("eth_getBlockByHash", rpc_params![hash, full])
            .await?)
    }
}

#[async_trait]
impl AppClient for Ee2Client {
    async fn add_msg(&self, msg: Vec<u8>) -> ClientResult<()> {
        self.inner
            .request(
                "intercept_addMsgToTxMempool",
                rpc_params![BASE64.encode(msg)],
            )
            .await?;
        Ok(())
    }
}
