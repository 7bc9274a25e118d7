//! Engine-API dual-execution interceptor: fans `engine_*`/`eth_*`/`cosmos_*` calls out to an
//! EVM backend and an application-chain backend, fusing their identifiers into the composites
//! this binary's RPC frontend hands back upstream.

mod args;
mod errors;

use std::{process, sync::Arc, time::Duration};

use args::{Args, Command, StartArgs};
use clap::Parser;
use enginefuse_client::{build_jwt_secret, Ee1Client, Ee2Client};
use enginefuse_config::{init_logging, Config, PendingTxTracker};
use enginefuse_engine::EngineMux;
use enginefuse_rpc_server::{serve, AppMsg, EngineRpcImpl, EthPass, ServerConfig};
use enginefuse_store::{BlockStore, MsgBuf, PayloadStore};
use errors::InitError;
use tracing::{error, info};

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Start(start_args) => main_inner(start_args),
    };

    if let Err(err) = result {
        error!(%err, "enginefuse failed to start");
        process::exit(1);
    }
}

fn main_inner(args: StartArgs) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("enginefuse-rt")
        .build()
        .expect("init: build tokio runtime");

    runtime.block_on(run_start(args))
}

async fn run_start(args: StartArgs) -> anyhow::Result<()> {
    let mut config = Config::from_file(&args.config).map_err(InitError::Config)?;
    if let Some(addr) = args.geth_engine_addr {
        config.geth_engine_addr = addr;
    }

    init_logging(config.log_level, config.log_format);
    info!(
        geth_engine_addr = %config.geth_engine_addr,
        peptide_engine_addr = %config.peptide_engine_addr,
        engine_server_addr = %config.engine_server_addr,
        "starting enginefuse"
    );

    let backend_request_timeout = Duration::from_millis(config.backend_request_timeout_ms);

    let jwt_secret = build_jwt_secret(&config.geth_auth_secret);
    let ee1 = Ee1Client::new(&config.geth_engine_addr, jwt_secret, backend_request_timeout).map_err(
        |source| InitError::Client {
            backend: "EE1 (geth)",
            source,
        },
    )?;
    let ee2 = Ee2Client::new(&config.peptide_engine_addr, backend_request_timeout).map_err(|source| {
        InitError::Client {
            backend: "EE2 (peptide)",
            source,
        }
    })?;

    let block_store = Arc::new(BlockStore::new());
    let payload_store = Arc::new(PayloadStore::new());
    let msg_buf = Arc::new(MsgBuf::new());
    let pending_tx = Arc::new(PendingTxTracker::new(Duration::from_secs(
        config.pending_tx_retention_secs,
    )));

    let mux = Arc::new(EngineMux::new(
        ee1.clone(),
        ee2.clone(),
        block_store.clone(),
        payload_store.clone(),
        msg_buf.clone(),
        pending_tx.clone(),
    ));

    let engine_rpc = EngineRpcImpl::new(mux);
    let eth_rpc = EthPass::new(ee1.clone(), ee2.clone(), block_store.clone(), pending_tx.clone());
    let app_rpc = AppMsg::new(msg_buf.clone());

    let server_config = ServerConfig {
        addr: config.engine_server_addr.clone(),
        max_batch_requests: config.max_batch_requests,
        max_response_body_size: config.max_response_body_size,
    };

    let (server_handle, bound_addr) = serve(&server_config, engine_rpc, eth_rpc, app_rpc)
        .await
        .map_err(|source| InitError::Server {
            addr: server_config.addr.clone(),
            source,
        })?;

    info!(addr = %bound_addr, "RPC frontend listening");

    wait_for_shutdown_signal().await;
    info!("shutdown signal received, stopping RPC frontend");

    // Frontend first, then the backend links - mirrors the node's own
    // `Stop()` ordering (stop serving before tearing down the clients
    // still in flight serving it).
    let _ = server_handle.stop();
    server_handle.stopped().await;
    drop(ee1);
    drop(ee2);

    info!("enginefuse stopped");
    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

    tokio::select! {
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
