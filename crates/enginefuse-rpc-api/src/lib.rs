//! `jsonrpsee`-macro trait definitions for the three upstream namespaces
//! (`engine_*`, `eth_*`, `cosmos_*`), split from their implementations in
//! `enginefuse-rpc-server`.

mod cosmos;
mod engine;
mod eth;

pub use cosmos::{CosmosApiServer, SendTransactionResult};
pub use engine::EngineApiServer;
pub use eth::EthApiServer;
