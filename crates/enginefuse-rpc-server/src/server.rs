use std::net::SocketAddr;

use anyhow::{anyhow, Result};
use enginefuse_client::{AppClient, BlockLookup, EngineClient, EthPassThrough};
use enginefuse_rpc_api::{CosmosApiServer, EngineApiServer, EthApiServer};
use jsonrpsee::{
    server::{BatchRequestConfig, ServerBuilder, ServerHandle},
    RpcModule,
};

use crate::{app::AppMsg, engine::EngineRpcImpl, eth::EthPass};

/// Frontend bind address and the batch-size limits configurable for the
/// HTTP+WS server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub max_batch_requests: u32,
    pub max_response_body_size: u32,
}

/// Merges the `engine`/`eth`/`cosmos` namespaces onto one `jsonrpsee`
/// HTTP+WS server.
///
/// Returns the handle alongside the address actually bound, which may differ
/// from `config.addr` when the configured port is `0` (used by tests and any
/// deployment that wants the OS to pick an ephemeral port).
pub async fn serve<E1, E2, C1, C2>(
    config: &ServerConfig,
    engine_rpc: EngineRpcImpl<E1, E2>,
    eth_rpc: EthPass<C1, C2>,
    app_rpc: AppMsg,
) -> Result<(ServerHandle, SocketAddr)>
where
    E1: EngineClient + Send + Sync + 'static,
    E2: EngineClient + AppClient + Send + Sync + 'static,
    C1: EthPassThrough + BlockLookup + Send + Sync + 'static,
    C2: BlockLookup + Send + Sync + 'static,
{
    let mut module = RpcModule::new(());
    module
        .merge(engine_rpc.into_rpc())
        .map_err(|e| anyhow!("failed to merge engine RPC module: {e}"))?;
    module
        .merge(eth_rpc.into_rpc())
        .map_err(|e| anyhow!("failed to merge eth RPC module: {e}"))?;
    module
        .merge(app_rpc.into_rpc())
        .map_err(|e| anyhow!("failed to merge cosmos RPC module: {e}"))?;

    let batch_config = if config.max_batch_requests == 0 {
        BatchRequestConfig::Disabled
    } else {
        BatchRequestConfig::Limit(config.max_batch_requests)
    };

    let server = ServerBuilder::new()
        .set_batch_request_config(batch_config)
        .max_response_body_size(config.max_response_body_size)
        .build(&config.addr)
        .await
        .map_err(|e| anyhow!("failed to build RPC server on {}: {e}", config.addr))?;

    let bound_addr = server
        .local_addr()
        .map_err(|e| anyhow!("failed to read bound address for {}: {e}", config.addr))?;

    Ok((server.start(module), bound_addr))
}
