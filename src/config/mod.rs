//! Wallet configuration
//!
//! The wallet is configured entirely from two environment variables:
//!
//! ```bash
//! export RPC_URL="http://localhost:8545"
//! export WALLET_SEED="test test test test test test test test test test test junk"
//! ```
//!
//! An unset variable is read as the empty string. Nothing is validated here;
//! the connection handle and signing identity reject bad values when they are
//! built.

pub mod rpc;

use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

pub use rpc::{endpoint_label, parse_rpc_url};

/// Secret recovery phrase or hex private key
pub const WALLET_SEED_ENV: &str = "WALLET_SEED";

/// JSON-RPC endpoint of the node the wallet talks to
pub const RPC_URL_ENV: &str = "RPC_URL";

/// Printable view of a [`WalletConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedactedConfig {
    /// `scheme://host[:port]`, `[EMPTY]` or `[INVALID]`
    #[serde(rename = "RPC_URL")]
    pub rpc_url: String,
    /// `[REDACTED]` or `[EMPTY]`
    #[serde(rename = "WALLET_SEED")]
    pub seed: &'static str,
}

/// Raw wallet configuration
pub struct WalletConfig {
    /// Node endpoint URL, unvalidated
    pub rpc_url: String,
    /// Seed phrase or private key, never logged
    pub seed: SecretString,
}

impl WalletConfig {
    pub fn new(rpc_url: impl Into<String>, seed: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            seed: SecretString::from(seed.into()),
        }
    }

    /// Read `RPC_URL` and `WALLET_SEED` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read both values through `lookup`, treating a missing key as empty
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Endpoint first, then seed.
        let rpc_url = lookup(RPC_URL_ENV).unwrap_or_default();
        if rpc_url.is_empty() {
            tracing::debug!("{} is unset or empty", RPC_URL_ENV);
        }

        let seed = lookup(WALLET_SEED_ENV).unwrap_or_default();
        if seed.is_empty() {
            tracing::debug!("{} is unset or empty", WALLET_SEED_ENV);
        }

        Self::new(rpc_url, seed)
    }

    /// Read a dotenv file without touching the process environment
    ///
    /// Keys missing from the file fall back to the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        let mut vars = HashMap::new();
        for item in iter {
            let (key, value) =
                item.map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
            vars.insert(key, value);
        }

        tracing::debug!(path = %path.display(), keys = vars.len(), "Loaded env file");

        Ok(Self::from_lookup(|key| {
            vars.get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
        }))
    }

    /// Configuration with the seed masked, safe to print
    pub fn redacted(&self) -> RedactedConfig {
        let seed = self.seed.expose_secret();
        let seed_state = if seed.trim().is_empty() {
            "[EMPTY]"
        } else {
            "[REDACTED]"
        };

        let rpc_url = if self.rpc_url.trim().is_empty() {
            "[EMPTY]".to_string()
        } else {
            parse_rpc_url(&self.rpc_url)
                .map(|url| endpoint_label(&url))
                .unwrap_or_else(|_| "[INVALID]".to_string())
        };

        RedactedConfig {
            rpc_url,
            seed: seed_state,
        }
    }
}

impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("rpc_url", &self.rpc_url)
            .field("seed", &"[REDACTED]")
            .finish()
    }
}
