//! Process-wide signing identity
//!
//! The identity is built once during startup by [`init`] or [`init_with`] and
//! read through [`wallet`] afterwards. Every caller gets the same instance.
//! There is no re-initialization or teardown.

use super::signer::SigningIdentity;
use crate::config::WalletConfig;
use crate::{Error, Result};
use std::sync::{Arc, Mutex, OnceLock};

/// Write-once slot for a signing identity
///
/// Initialization attempts are serialized so at most one build runs. A failed
/// build leaves the cell empty.
pub struct WalletCell {
    identity: OnceLock<Arc<SigningIdentity>>,
    init_lock: Mutex<()>,
}

impl WalletCell {
    pub const fn new() -> Self {
        Self {
            identity: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    pub fn get(&self) -> Option<&Arc<SigningIdentity>> {
        self.identity.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.identity.get().is_some()
    }

    /// Return the stored identity, running `build` only if there is none yet
    pub fn get_or_init_with<F>(&self, build: F) -> Result<&Arc<SigningIdentity>>
    where
        F: FnOnce() -> Result<SigningIdentity>,
    {
        if let Some(identity) = self.identity.get() {
            return Ok(identity);
        }

        let _guard = self.init_lock.lock().unwrap_or_else(|p| p.into_inner());

        if let Some(identity) = self.identity.get() {
            tracing::debug!("Wallet already initialized");
            return Ok(identity);
        }

        let identity = Arc::new(build()?);
        tracing::info!(
            address = %identity.address(),
            endpoint = %identity.connection().endpoint_label(),
            "Wallet initialized"
        );

        Ok(self.identity.get_or_init(|| identity))
    }
}

impl Default for WalletCell {
    fn default() -> Self {
        Self::new()
    }
}

static WALLET: WalletCell = WalletCell::new();

/// Initialize the process-wide identity from `RPC_URL` and `WALLET_SEED`
///
/// Later calls return the existing identity without reading the environment.
pub fn init() -> Result<&'static Arc<SigningIdentity>> {
    WALLET.get_or_init_with(|| SigningIdentity::from_config(&WalletConfig::from_env()))
}

/// Initialize the process-wide identity from an explicit configuration
///
/// Ignored if the identity already exists.
pub fn init_with(config: &WalletConfig) -> Result<&'static Arc<SigningIdentity>> {
    WALLET.get_or_init_with(|| SigningIdentity::from_config(config))
}

/// The process-wide identity
pub fn wallet() -> Result<&'static Arc<SigningIdentity>> {
    WALLET.get().ok_or(Error::NotInitialized)
}
