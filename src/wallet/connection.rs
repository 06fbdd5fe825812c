//! Connection handle to a JSON-RPC node
//!
//! Building a handle validates the URL and sets up alloy's HTTP transport.
//! No request is sent until one of the async query methods is called.

use crate::config::{endpoint_label, parse_rpc_url};
use crate::{Error, Result};
use alloy::providers::{DynProvider, Provider, RootProvider};
use url::Url;

/// Read-only endpoint to a remote ledger node
pub struct ConnectionHandle {
    url: Url,
    provider: DynProvider,
}

impl ConnectionHandle {
    /// Validate `rpc_url` and build a handle for it
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = parse_rpc_url(rpc_url)?;
        Ok(Self::from_url(url))
    }

    /// Build a handle for an already validated URL
    pub fn from_url(url: Url) -> Self {
        let provider = RootProvider::new_http(url.clone()).erased();
        tracing::debug!(endpoint = %endpoint_label(&url), "Connection handle created");
        Self { url, provider }
    }

    /// Full endpoint URL; may contain an API key, do not log
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Endpoint without path or credentials, safe to log
    pub fn endpoint_label(&self) -> String {
        endpoint_label(&self.url)
    }

    /// Unsigned provider owning the HTTP transport; signing identities layer over it
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    pub async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| Error::Rpc(format!("eth_chainId failed: {}", e)))
    }

    pub async fn block_number(&self) -> Result<u64> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| Error::Rpc(format!("eth_blockNumber failed: {}", e)))
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("endpoint", &self.endpoint_label())
            .finish()
    }
}
