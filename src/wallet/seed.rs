//! Seed parsing
//!
//! A seed is either a raw secp256k1 private key (64 hex characters, optional
//! `0x` prefix) or a BIP-39 English mnemonic. Mnemonics derive along
//! `m/44'/60'/0'/0/{index}`.
//!
//! Error messages never include any part of the seed.

use crate::{Error, Result};
use alloy::primitives::B256;
use alloy::signers::local::coins_bip39::English;
use alloy::signers::local::{MnemonicBuilder, PrivateKeySigner};
use secrecy::{ExposeSecret, SecretString};
use std::str::FromStr;

/// Word counts BIP-39 allows
const MNEMONIC_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// What kind of secret a seed string holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedKind {
    PrivateKey,
    Mnemonic { words: usize },
}

impl SeedKind {
    /// Classify a seed by shape only; checksum and scalar range are checked on derivation
    pub fn classify(seed: &str) -> Result<Self> {
        let seed = seed.trim();
        if seed.is_empty() {
            return Err(Error::MalformedSeed(format!(
                "{} is empty",
                crate::config::WALLET_SEED_ENV
            )));
        }

        if seed.split_whitespace().nth(1).is_some() {
            let words = seed.split_whitespace().count();
            if !MNEMONIC_WORD_COUNTS.contains(&words) {
                return Err(Error::MalformedSeed(format!(
                    "mnemonic has {} words, expected 12, 15, 18, 21 or 24",
                    words
                )));
            }
            return Ok(Self::Mnemonic { words });
        }

        let hex = strip_hex_prefix(seed);
        if hex.len() == 64 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Ok(Self::PrivateKey);
        }

        Err(Error::MalformedSeed(
            "expected a 32-byte hex private key or a mnemonic phrase".to_string(),
        ))
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Derive the signer a seed describes
///
/// `index` selects the account for mnemonics and is ignored for private keys.
pub fn derive_signer(seed: &SecretString, index: u32) -> Result<PrivateKeySigner> {
    let seed = seed.expose_secret().trim();

    match SeedKind::classify(seed)? {
        SeedKind::PrivateKey => {
            let key = B256::from_str(strip_hex_prefix(seed))
                .map_err(|_| Error::MalformedSeed("private key is not valid hex".to_string()))?;
            PrivateKeySigner::from_bytes(&key).map_err(|_| {
                Error::MalformedSeed("private key is not a valid secp256k1 scalar".to_string())
            })
        }
        SeedKind::Mnemonic { words } => {
            let phrase = seed.split_whitespace().collect::<Vec<_>>().join(" ");
            MnemonicBuilder::<English>::default()
                .phrase(phrase)
                .index(index)
                .map_err(|_| Error::MalformedSeed(format!("invalid account index {}", index)))?
                .build()
                .map_err(|_| {
                    Error::MalformedSeed(format!(
                        "{}-word mnemonic failed BIP-39 validation (unknown word or bad checksum)",
                        words
                    ))
                })
        }
    }
}
