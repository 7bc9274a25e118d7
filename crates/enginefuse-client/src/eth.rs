use async_trait::async_trait;
use enginefuse_types::Hash;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::errors::ClientResult;

/// `eth_getBlockByNumber`/`eth_getBlockByHash`, called against both
/// backends so their hashes can be fused. Every other `eth_*` method is a
/// straight pass-through to EE1 alone, see [`EthPassThrough`].
///
/// `#[async_trait]` boxes the returned future as `Send`, which the RPC
/// frontend's server traits require of anything they call into.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BlockLookup {
    async fn get_block_by_number(
        &self,
        tag: serde_json::Value,
        full: bool,
    ) -> ClientResult<Option<serde_json::Value>>;

    async fn get_block_by_hash(
        &self,
        hash: Hash,
        full: bool,
    ) -> ClientResult<Option<serde_json::Value>>;
}

/// `eth_*` methods that go to EE1 only, with no identifier fusion involved.
///
/// `#[async_trait]` boxes the returned future as `Send`, which the RPC
/// frontend's server traits require of anything they call into.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EthPassThrough {
    async fn chain_id(&self) -> ClientResult<serde_json::Value>;

    async fn get_proof(
        &self,
        address: serde_json::Value,
        storage_keys: Vec<serde_json::Value>,
        block: serde_json::Value,
    ) -> ClientResult<serde_json::Value>;

    async fn get_transaction_receipt(&self, hash: Hash) -> ClientResult<Option<serde_json::Value>>;

    async fn get_code(
        &self,
        address: serde_json::Value,
        block: serde_json::Value,
    ) -> ClientResult<serde_json::Value>;

    async fn estimate_gas(
        &self,
        call: serde_json::Value,
        block: Option<serde_json::Value>,
    ) -> ClientResult<serde_json::Value>;

    async fn get_transaction_count(
        &self,
        address: serde_json::Value,
        block: serde_json::Value,
    ) -> ClientResult<serde_json::Value>;

    async fn call(
        &self,
        call: serde_json::Value,
        block: Option<serde_json::Value>,
    ) -> ClientResult<serde_json::Value>;

    async fn send_raw_transaction(&self, raw: serde_json::Value) -> ClientResult<Hash>;

    async fn max_priority_fee_per_gas(&self) -> ClientResult<serde_json::Value>;
}
