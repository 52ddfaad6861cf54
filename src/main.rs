//! turnlink - peer-synchronized tic-tac-toe in the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::net::SocketAddr;
use std::path::Path;
use turnlink::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            bind,
            peer,
            group,
        } => run_play(&config, bind, peer, group).await,
        Command::DefaultConfig => {
            print!("{}", Config::default().to_toml()?);
            Ok(())
        }
    }
}

/// Loads config, applies command-line overrides and runs the terminal game.
async fn run_play(
    path: &Path,
    bind: Option<SocketAddr>,
    peer: Option<SocketAddr>,
    group: Option<u16>,
) -> Result<()> {
    let config = Config::load_or_default(path)?;

    let mut network = *config.network();
    if let Some(bind) = bind {
        network = network.with_bind(bind);
    }
    if let Some(peer) = peer {
        network = network.with_peer(peer);
    }
    if let Some(group) = group {
        network = network.with_group_id(group);
    }
    let config = config.with_network(network);
    config.validate()?;

    turnlink::run_tui(config).await
}
