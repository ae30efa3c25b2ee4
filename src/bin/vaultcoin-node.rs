#![forbid(unsafe_code)]
//! VaultCoin node: HTTP API over a single in-memory ledger

use clap::Parser;
use colored::*;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vaultcoin::api::run_api_server;
use vaultcoin::config::{load_config, DEFAULT_CONFIG_PATH};
use vaultcoin::node::Node;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Override the listening port
    #[arg(long)]
    port: Option<u16>,
    /// Override the listening host
    #[arg(long)]
    host: Option<String>,
    /// Peer to register at startup (repeatable)
    #[arg(long = "peer")]
    peers: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(port) = cli.port {
        config.network.port = port;
    }
    if let Some(host) = cli.host {
        config.network.host = host;
    }
    config.network.bootstrap_peers.extend(cli.peers);

    let host: IpAddr = config
        .network
        .host
        .parse()
        .map_err(|e| format!("invalid host {}: {}", config.network.host, e))?;
    let addr = SocketAddr::new(host, config.network.port);

    let node = Arc::new(Node::new(config)?);

    println!("{}", "🔐 VaultCoin node".bright_cyan().bold());
    println!("   node id : {}", node.node_id.bright_yellow());
    println!("   api     : http://{}", addr.to_string().bright_green());
    println!("   peers   : {}", node.registry.len());

    run_api_server(node, addr).await?;
    Ok(())
}
