//! Wallet construction
//!
//! This module handles seed parsing, the node connection and the signing
//! identity. The private key NEVER leaves this module.

mod connection;
mod global;
mod seed;
mod signer;

pub use connection::ConnectionHandle;
pub use global::{init, init_with, wallet, WalletCell};
pub use seed::{derive_signer, SeedKind};
pub use signer::SigningIdentity;
