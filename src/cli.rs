//! Command-line interface for turnlink.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// turnlink - two-player tic-tac-toe over a peer-to-peer datagram link
#[derive(Parser, Debug)]
#[command(name = "turnlink")]
#[command(about = "Peer-synchronized tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal against a peer
    Play {
        /// Path to the TOML config file (defaults are used if it does not exist)
        #[arg(short, long, default_value = "turnlink.toml")]
        config: PathBuf,

        /// Local address to bind, overriding the config
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Peer address, overriding the config
        #[arg(long)]
        peer: Option<SocketAddr>,

        /// Group id both peers join, overriding the config
        #[arg(long)]
        group: Option<u16>,
    },

    /// Print the default configuration as TOML
    DefaultConfig,
}
