use std::sync::Arc;

use async_trait::async_trait;
use enginefuse_client::{BlockLookup, EthPassThrough};
use enginefuse_config::PendingTxTracker;
use enginefuse_store::BlockStore;
use enginefuse_types::{CompositeBlock, Hash};
use jsonrpsee::core::RpcResult;
use serde_json::Value;
use tracing::warn;

use crate::errors::map_client_error;

fn extract_hash(value: &Value) -> Option<Hash> {
    value.get("hash")?.as_str()?.parse().ok()
}

fn substitute_hash(mut value: Value, hash: Hash) -> Value {
    if let Some(obj) = value.as_object_mut() {
        obj.insert("hash".to_string(), Value::String(hash.to_string()));
    }
    value
}

/// Implements the `eth_*` passthrough namespace. `getBlockByNumber`/
/// `getBlockByHash` are the only two methods that touch [`BlockStore`]; every
/// other method is a straight call to `EE1`.
#[derive(Debug)]
pub struct EthPass<C1, C2> {
    ee1: C1,
    ee2: C2,
    block_store: Arc<BlockStore>,
    pending_tx: Arc<PendingTxTracker>,
}

impl<C1, C2> EthPass<C1, C2> {
    pub fn new(ee1: C1, ee2: C2, block_store: Arc<BlockStore>, pending_tx: Arc<PendingTxTracker>) -> Self {
        Self {
            ee1,
            ee2,
            block_store,
            pending_tx,
        }
    }
}

#[async_trait]
impl<C1, C2> enginefuse_rpc_api::EthApiServer for EthPass<C1, C2>
where
    C1: EthPassThrough + BlockLookup + Send + Sync + 'static,
    C2: BlockLookup + Send + Sync + 'static,
{
    async fn chain_id(&self) -> RpcResult<Value> {
        self.ee1.chain_id().await.map_err(map_client_error)
    }

    async fn get_block_by_number(&self, block: Value, full_tx: bool) -> RpcResult<Option<Value>> {
        let ee1_block = self
            .ee1
            .get_block_by_number(block.clone(), full_tx)
            .await
            .map_err(map_client_error)?;

        let Some(ee1_block) = ee1_block else {
            return Ok(None);
        };
        let Some(ee1_hash) = extract_hash(&ee1_block) else {
            return Ok(Some(ee1_block));
        };

        match self.ee2.get_block_by_number(block, full_tx).await {
            Ok(Some(ee2_block)) => {
                if let Some(ee2_hash) = extract_hash(&ee2_block) {
                    let composite = self.block_store.record(CompositeBlock::new(ee1_hash, ee2_hash));
                    return Ok(Some(substitute_hash(ee1_block, composite)));
                }
                warn!("EE2 getBlockByNumber response had no hash field, using EE1 hash unfused");
                Ok(Some(ee1_block))
            }
            Ok(None) => {
                warn!("EE2 getBlockByNumber returned no block, using EE1 hash unfused");
                Ok(Some(ee1_block))
            }
            Err(err) => {
                warn!(%err, "EE2 getBlockByNumber failed, using EE1 hash unfused");
                Ok(Some(ee1_block))
            }
        }
    }

    async fn get_block_by_hash(&self, block_hash: Hash, full_tx: bool) -> RpcResult<Option<Value>> {
        let pair = self
            .block_store
            .defuse(block_hash)
            .map_err(crate::errors::map_store_error)?;

        let ee1_block = self
            .ee1
            .get_block_by_hash(pair.ee1_hash, full_tx)
            .await
            .map_err(map_client_error)?;
        let Some(ee1_block) = ee1_block else {
            return Ok(None);
        };

        // Unlike `getBlockByNumber`, an EE2 failure here is fatal: the
        // composite hash was already minted and must defuse consistently.
        self.ee2
            .get_block_by_hash(pair.ee2_hash, full_tx)
            .await
            .map_err(map_client_error)?;

        Ok(Some(substitute_hash(ee1_block, block_hash)))
    }

    async fn get_transaction_receipt(&self, tx_hash: Hash) -> RpcResult<Option<Value>> {
        self.ee1
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(map_client_error)
    }

    async fn get_proof(&self, address: Value, storage_keys: Vec<Value>, block: Value) -> RpcResult<Value> {
        self.ee1
            .get_proof(address, storage_keys, block)
            .await
            .map_err(map_client_error)
    }

    async fn get_code(&self, address: Value, block: Value) -> RpcResult<Value> {
        self.ee1.get_code(address, block).await.map_err(map_client_error)
    }

    async fn estimate_gas(&self, call: Value, block: Option<Value>) -> RpcResult<Value> {
        self.ee1.estimate_gas(call, block).await.map_err(map_client_error)
    }

    async fn get_transaction_count(&self, address: Value, block: Value) -> RpcResult<Value> {
        self.ee1
            .get_transaction_count(address, block)
            .await
            .map_err(map_client_error)
    }

    async fn call(&self, call: Value, block: Option<Value>) -> RpcResult<Value> {
        self.ee1.call(call, block).await.map_err(map_client_error)
    }

    async fn send_raw_transaction(&self, raw_tx: Value) -> RpcResult<Hash> {
        let hash = self
            .ee1
            .send_raw_transaction(raw_tx)
            .await
            .map_err(map_client_error)?;
        self.pending_tx.record(hash);
        Ok(hash)
    }

    async fn max_priority_fee_per_gas(&self) -> RpcResult<Value> {
        self.ee1.max_priority_fee_per_gas().await.map_err(map_client_error)
    }
}
