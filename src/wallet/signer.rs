//! Signing identity bound to a connection handle
//!
//! SECURITY: the private key lives only inside alloy's `PrivateKeySigner`.
//! - Keys are never serialized
//! - Keys are never logged
//! - `Debug` output is redacted

use super::connection::ConnectionHandle;
use super::seed::derive_signer;
use crate::config::WalletConfig;
use crate::{Error, Result};
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, Signer, SignerSync};
use secrecy::SecretString;
use std::sync::Arc;
use url::Url;

/// Keypair derived from a seed, routed through one endpoint
pub struct SigningIdentity {
    /// The signer
    signer: PrivateKeySigner,
    /// Public address (safe to expose)
    address: Address,
    /// Ethereum wallet for alloy integration
    wallet: EthereumWallet,
    /// Endpoint this identity talks to
    connection: Arc<ConnectionHandle>,
    /// Provider that fills and signs transactions with this identity
    provider: DynProvider,
}

impl SigningIdentity {
    /// Build the identity a configuration describes
    ///
    /// The endpoint is validated and its handle built before the seed is read.
    pub fn from_config(config: &WalletConfig) -> Result<Self> {
        let connection = Arc::new(ConnectionHandle::new(&config.rpc_url)?);
        Self::from_seed(&config.seed, connection)
    }

    /// Derive account 0 of `seed` and bind it to `connection`
    pub fn from_seed(seed: &SecretString, connection: Arc<ConnectionHandle>) -> Result<Self> {
        Self::from_seed_at_index(seed, 0, connection)
    }

    /// Derive account `index` of a mnemonic (ignored for raw keys)
    pub fn from_seed_at_index(
        seed: &SecretString,
        index: u32,
        connection: Arc<ConnectionHandle>,
    ) -> Result<Self> {
        let signer = derive_signer(seed, index)?;
        Ok(Self::from_signer(signer, connection))
    }

    /// Bind an existing signer to `connection`
    pub fn from_signer(signer: PrivateKeySigner, connection: Arc<ConnectionHandle>) -> Self {
        let address = signer.address();
        let wallet = EthereumWallet::from(signer.clone());
        let provider = ProviderBuilder::new()
            .wallet(wallet.clone())
            .connect_provider(connection.provider().clone())
            .erased();

        Self {
            signer,
            address,
            wallet,
            connection,
            provider,
        }
    }

    /// Get the public address (safe to share)
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the address as an EIP-55 checksummed string
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }

    /// URL of the bound endpoint
    pub fn endpoint(&self) -> &Url {
        self.connection.url()
    }

    pub fn connection(&self) -> &Arc<ConnectionHandle> {
        &self.connection
    }

    /// Provider that signs with this identity and sends through the bound endpoint
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Get a reference to the EthereumWallet for use with other alloy providers
    pub fn ethereum_wallet(&self) -> &EthereumWallet {
        &self.wallet
    }

    /// Sign a 32-byte hash
    pub fn sign_hash(&self, hash: &B256) -> Result<Signature> {
        self.signer
            .sign_hash_sync(hash)
            .map_err(|e| Error::Signing(format!("Signing failed: {}", e)))
    }

    /// Sign a message with the EIP-191 prefix
    pub async fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        self.signer
            .sign_message(message)
            .await
            .map_err(|e| Error::Signing(format!("Message signing failed: {}", e)))
    }

    pub async fn chain_id(&self) -> Result<u64> {
        self.connection.chain_id().await
    }

    /// Native balance at the latest block
    pub async fn balance(&self) -> Result<U256> {
        self.provider
            .get_balance(self.address)
            .await
            .map_err(|e| Error::Rpc(format!("eth_getBalance failed: {}", e)))
    }

    /// Transaction count at the latest block
    pub async fn nonce(&self) -> Result<u64> {
        self.provider
            .get_transaction_count(self.address)
            .await
            .map_err(|e| Error::Rpc(format!("eth_getTransactionCount failed: {}", e)))
    }
}

// Implement Debug manually to avoid exposing the signer
impl std::fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("address", &self.address)
            .field("endpoint", &self.connection.endpoint_label())
            .field("signer", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, eip191_hash_message, keccak256};

    // Anvil's default mnemonic and its account 0 key (DO NOT use in production!)
    const PHRASE: &str = "test test test test test test test test test test test junk";
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ANVIL_0: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    #[tokio::test]
    async fn from_config_binds_endpoint() {
        let config = WalletConfig::new("http://localhost:8545", PHRASE);
        let identity = SigningIdentity::from_config(&config).unwrap();

        assert_eq!(identity.address(), ANVIL_0);
        assert_eq!(identity.endpoint().as_str(), "http://localhost:8545/");
        assert_eq!(
            identity.address_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[tokio::test]
    async fn derivation_is_reproducible() {
        let config = WalletConfig::new("http://localhost:8545", PHRASE);
        let a = SigningIdentity::from_config(&config).unwrap();
        let b = SigningIdentity::from_config(&config).unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[tokio::test]
    async fn empty_seed_is_malformed() {
        let config = WalletConfig::new("http://localhost:8545", "");
        let err = SigningIdentity::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::MalformedSeed(_)));
    }

    #[tokio::test]
    async fn url_is_checked_before_seed() {
        let config = WalletConfig::new("", "");
        let err = SigningIdentity::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::MalformedUrl(_)));
    }

    #[tokio::test]
    async fn identities_can_share_a_connection() {
        let connection = Arc::new(ConnectionHandle::new("http://localhost:8545").unwrap());
        let first = SigningIdentity::from_seed_at_index(
            &SecretString::from(PHRASE.to_string()),
            0,
            connection.clone(),
        )
        .unwrap();
        let second = SigningIdentity::from_seed_at_index(
            &SecretString::from(PHRASE.to_string()),
            1,
            connection.clone(),
        )
        .unwrap();

        assert_ne!(first.address(), second.address());
        assert!(Arc::ptr_eq(first.connection(), second.connection()));
        assert_eq!(Arc::strong_count(&connection), 3);
    }

    #[tokio::test]
    async fn signing_provider_reuses_connection_transport() {
        let connection = Arc::new(ConnectionHandle::new("http://localhost:8545").unwrap());
        let identity = SigningIdentity::from_seed(
            &SecretString::from(PHRASE.to_string()),
            connection.clone(),
        )
        .unwrap();

        assert!(std::ptr::eq(
            identity.provider().root().client(),
            connection.provider().root().client()
        ));
    }

    #[tokio::test]
    async fn reads_fail_with_rpc_error_when_node_is_down() {
        let identity =
            SigningIdentity::from_config(&WalletConfig::new("http://127.0.0.1:9", PHRASE))
                .unwrap();

        assert!(matches!(identity.balance().await, Err(Error::Rpc(_))));
        assert!(matches!(identity.nonce().await, Err(Error::Rpc(_))));
    }

    #[tokio::test]
    async fn sign_hash_recovers_to_address() {
        let identity = SigningIdentity::from_config(&WalletConfig::new(
            "http://localhost:8545",
            TEST_KEY,
        ))
        .unwrap();
        let hash = keccak256(b"node-wallet");

        let signature = identity.sign_hash(&hash).unwrap();
        assert_eq!(signature.recover_address_from_prehash(&hash).unwrap(), ANVIL_0);
    }

    #[tokio::test]
    async fn sign_message_uses_eip191() {
        let identity =
            SigningIdentity::from_config(&WalletConfig::new("http://localhost:8545", PHRASE))
                .unwrap();
        let message = b"Hello, World!";

        let signature = identity.sign_message(message).await.unwrap();
        assert_eq!(signature.as_bytes().len(), 65);
        assert_eq!(
            signature
                .recover_address_from_prehash(&eip191_hash_message(message))
                .unwrap(),
            ANVIL_0
        );
    }

    #[tokio::test]
    async fn debug_redacts_key() {
        let identity = SigningIdentity::from_config(&WalletConfig::new(
            "http://localhost:8545",
            TEST_KEY,
        ))
        .unwrap();

        let debug_str = format!("{:?}", identity);

        assert!(!debug_str.contains("ac0974bec"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
