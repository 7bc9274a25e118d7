use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Engine-API interceptor fanning calls out to an EVM and an application-chain backend.
#[derive(Debug, Parser)]
#[command(name = "enginefuse", about)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Start the interceptor node.
    Start(StartArgs),
}

#[derive(Debug, ClapArgs)]
pub(crate) struct StartArgs {
    /// path to the interceptor's JSON configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub(crate) config: PathBuf,

    /// overrides `gethEngineAddr` from the config file
    #[arg(long)]
    pub(crate) geth_engine_addr: Option<String>,
}
