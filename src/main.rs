//! Node Wallet CLI
//!
//! Command-line interface for inspecting the wallet configured by
//! `RPC_URL` and `WALLET_SEED`.

use alloy::hex;
use alloy::primitives::utils::format_ether;
use clap::{Parser, Subcommand};
use node_wallet::{Error, Result, WalletConfig};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "node-wallet")]
#[command(about = "Signing wallet bound to a JSON-RPC node")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read RPC_URL and WALLET_SEED from this dotenv file
    #[arg(short, long, global = true)]
    env_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the wallet address and endpoint (no network access)
    Address,

    /// Show the configuration with secrets masked
    Config,

    /// Sign a message with the EIP-191 prefix
    SignMessage {
        /// Message text
        #[arg(short, long)]
        message: String,
    },

    /// Query chain id, latest block, balance and nonce through the bound endpoint
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json);

    let config = match &cli.env_file {
        Some(path) => WalletConfig::from_env_file(path)?,
        None => WalletConfig::from_env(),
    };

    match cli.command {
        Commands::Config => {
            let rendered = serde_json::to_string_pretty(&config.redacted())
                .map_err(|e| Error::Config(e.to_string()))?;
            println!("{}", rendered);
        }
        Commands::Address => {
            let wallet = node_wallet::init_with(&config)?;
            println!("address:  {}", wallet.address_string());
            println!("endpoint: {}", wallet.connection().endpoint_label());
        }
        Commands::SignMessage { message } => {
            node_wallet::init_with(&config)?;
            run_sign_message(&message).await?;
        }
        Commands::Status => {
            node_wallet::init_with(&config)?;
            run_status().await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    // stdout carries command output only
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run_sign_message(message: &str) -> Result<()> {
    let wallet = node_wallet::wallet()?;
    let signature = wallet.sign_message(message.as_bytes()).await?;

    println!("address:   {}", wallet.address_string());
    println!("signature: 0x{}", hex::encode(signature.as_bytes()));
    Ok(())
}

async fn run_status() -> Result<()> {
    let wallet = node_wallet::wallet()?;

    tracing::info!(
        address = %wallet.address(),
        endpoint = %wallet.connection().endpoint_label(),
        "Querying node"
    );

    let chain_id = wallet.chain_id().await?;
    let block = wallet.connection().block_number().await?;
    let balance = wallet.balance().await?;
    let nonce = wallet.nonce().await?;

    println!("address:  {}", wallet.address_string());
    println!("endpoint: {}", wallet.connection().endpoint_label());
    println!("chain id: {}", chain_id);
    println!("block:    {}", block);
    println!("balance:  {} ETH", format_ether(balance));
    println!("nonce:    {}", nonce);
    Ok(())
}
