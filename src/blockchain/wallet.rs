//! Wallet management and transaction signing.
//!
//! # Security
//! - Private keys are loaded from environment variables or CLI flags only
//!   (see [`CLIENT_KEY_ENV_VAR`] and [`USER_KEY_ENV_VAR`])
//! - Keys are never logged or serialized

use alloy::primitives::{hex, Address, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Environment variable holding the client's private key.
pub const CLIENT_KEY_ENV_VAR: &str = "TYRON_CLIENT_PRIVATE_KEY";

/// Environment variable holding the user's private key.
pub const USER_KEY_ENV_VAR: &str = "TYRON_USER_PRIVATE_KEY";

/// Wallet for transaction signing with nonce tracking.
#[derive(Debug)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// Nonce of the last transaction this account sent.
    nonce: Arc<AtomicU64>,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    ///
    /// # Security
    /// The private key is parsed and stored securely. It is never logged.
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex
            .trim()
            .strip_prefix("0x")
            .unwrap_or(private_key_hex.trim());

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::debug!(address = %signer.address(), "Wallet initialized");

        Ok(Self {
            signer,
            nonce: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Compressed SEC1 public key, hex-encoded without prefix.
    pub fn public_key_hex(&self) -> String {
        let point = self
            .signer
            .credential()
            .verifying_key()
            .as_affine()
            .to_encoded_point(true);
        hex::encode(point.as_bytes())
    }

    /// Set the nonce (e.g., after querying from chain).
    pub fn set_nonce(&self, nonce: u64) {
        self.nonce.store(nonce, Ordering::SeqCst);
    }

    /// Get current nonce without incrementing.
    pub fn current_nonce(&self) -> u64 {
        self.nonce.load(Ordering::SeqCst)
    }

    /// The nonce the next transaction must carry.
    pub fn next_nonce(&self) -> u64 {
        self.current_nonce() + 1
    }

    /// Record that a transaction was accepted; returns the new current nonce.
    pub fn increment_nonce(&self) -> u64 {
        self.nonce.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Sign a message hash.
    ///
    /// # Arguments
    /// * `hash` - The 32-byte hash to sign
    pub async fn sign_hash(&self, hash: B256) -> BlockchainResult<alloy::signers::Signature> {
        self.signer
            .sign_hash(&hash)
            .await
            .map_err(|e| BlockchainError::Wallet(format!("Signing failed: {}", e)))
    }
}

impl Clone for Wallet {
    fn clone(&self) -> Self {
        Self {
            signer: self.signer.clone(),
            nonce: self.nonce.clone(),
        }
    }
}
