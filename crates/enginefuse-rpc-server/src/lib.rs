//! The combined JSON-RPC frontend: `EngineRpcImpl`/`EthPass`/`AppMsg`
//! implementations of the `enginefuse-rpc-api` traits, merged onto one
//! `jsonrpsee` HTTP+WS server.

mod app;
mod engine;
mod errors;
mod eth;
mod server;

pub use app::AppMsg;
pub use engine::EngineRpcImpl;
pub use eth::EthPass;
pub use server::{serve, ServerConfig};
