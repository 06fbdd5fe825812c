//! Node Wallet
//!
//! Builds one signing wallet per process from two environment variables:
//! - `RPC_URL` - JSON-RPC endpoint of the node
//! - `WALLET_SEED` - BIP-39 mnemonic or hex private key
//!
//! ```no_run
//! fn main() -> node_wallet::Result<()> {
//!     node_wallet::init()?;
//!
//!     // Anywhere else in the process
//!     let wallet = node_wallet::wallet()?;
//!     println!("{}", wallet.address());
//!     Ok(())
//! }
//! ```
//!
//! # Security Model
//!
//! - The seed is held in a `SecretString` and is never logged or echoed in errors
//! - Only the scheme and host of the RPC URL are logged
//! - Private keys never leave the wallet module

pub mod config;
pub mod wallet;

mod error;

// Re-export commonly used types
pub use config::{RedactedConfig, WalletConfig, RPC_URL_ENV, WALLET_SEED_ENV};
pub use error::{Error, Result};
pub use wallet::{init, init_with, wallet, ConnectionHandle, SigningIdentity, WalletCell};
