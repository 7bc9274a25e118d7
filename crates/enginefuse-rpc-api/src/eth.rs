use enginefuse_types::Hash;
use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use serde_json::Value;

/// The `eth_*` read methods the driver issues against the interceptor.
///
/// `getBlockByNumber`/`getBlockByHash` are the only two that mint composite
/// hashes; the rest pass straight through to `EE1`.
#[rpc(server, namespace = "eth")]
pub trait EthApi {
    #[method(name = "chainId")]
    async fn chain_id(&self) -> RpcResult<Value>;

    #[method(name = "getBlockByNumber")]
    async fn get_block_by_number(&self, block: Value, full_tx: bool) -> RpcResult<Option<Value>>;

    #[method(name = "getBlockByHash")]
    async fn get_block_by_hash(&self, block_hash: Hash, full_tx: bool) -> RpcResult<Option<Value>>;

    #[method(name = "getTransactionReceipt")]
    async fn get_transaction_receipt(&self, tx_hash: Hash) -> RpcResult<Option<Value>>;

    #[method(name = "getProof")]
    async fn get_proof(&self, address: Value, storage_keys: Vec<Value>, block: Value) -> RpcResult<Value>;

    #[method(name = "getCode")]
    async fn get_code(&self, address: Value, block: Value) -> RpcResult<Value>;

    #[method(name = "estimateGas")]
    async fn estimate_gas(&self, call: Value, block: Option<Value>) -> RpcResult<Value>;

    #[method(name = "getTransactionCount")]
    async fn get_transaction_count(&self, address: Value, block: Value) -> RpcResult<Value>;

    #[method(name = "call")]
    async fn call(&self, call: Value, block: Option<Value>) -> RpcResult<Value>;

    #[method(name = "sendRawTransaction")]
    async fn send_raw_transaction(&self, raw_tx: Value) -> RpcResult<Hash>;

    #[method(name = "maxPriorityFeePerGas")]
    async fn max_priority_fee_per_gas(&self) -> RpcResult<Value>;
}
