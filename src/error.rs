//! Error types for wallet initialization

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The seed could not be turned into a keypair. Never carries the seed itself.
    #[error("Malformed seed: {0}")]
    MalformedSeed(String),

    #[error("Malformed RPC URL: {0}")]
    MalformedUrl(String),

    #[error("Wallet not initialized; call init() during startup")]
    NotInitialized,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("RPC error: {0}")]
    Rpc(String),
}

pub type Result<T> = std::result::Result<T, Error>;
