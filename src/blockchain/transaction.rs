//! Transaction building, signing, and confirmation monitoring.
//!
//! # Responsibilities
//! - Assemble the transaction envelope
//! - Sign it with the sender's wallet
//! - Poll for a receipt within a fixed budget
//!
//! A broadcast is never retried here; an exhausted budget is reported as
//! [`ConfirmationStatus::TimedOut`].

use alloy::primitives::{hex, keccak256, Address, B256, U256};
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;

use crate::blockchain::network::NetworkClient;
use crate::blockchain::types::{
    BlockchainResult, ConfirmationConfig, ConfirmationStatus, GasParams, TranId,
};
use crate::blockchain::wallet::Wallet;

/// An unsigned transaction. Built fresh for every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxEnvelope {
    /// `(chain_id << 16) + msg_version`.
    pub version: u32,
    pub nonce: u64,
    /// Destination; the zero address for deployments.
    pub to_addr: Address,
    /// Amount transferred, in Qa.
    pub amount: U256,
    /// Sender's compressed public key, hex.
    pub pub_key: String,
    pub gas: GasParams,
    /// Contract source for deployments, empty otherwise.
    pub code: String,
    /// Serialized transition or init parameters.
    pub data: String,
    pub priority: bool,
}

impl TxEnvelope {
    /// The wire fields, without the signature.
    fn fields(&self) -> serde_json::Value {
        json!({
            "version": self.version,
            "nonce": self.nonce,
            "toAddr": hex::encode(self.to_addr),
            "amount": self.amount.to_string(),
            "pubKey": self.pub_key,
            "gasPrice": self.gas.price.to_string(),
            "gasLimit": self.gas.limit.to_string(),
            "code": self.code,
            "data": self.data,
            "priority": self.priority,
        })
    }

    /// Hash the envelope is signed over.
    pub fn signing_hash(&self) -> BlockchainResult<B256> {
        let bytes = serde_json::to_vec(&self.fields())?;
        Ok(keccak256(bytes))
    }

    /// Sign the envelope. Immutable from here on.
    pub async fn sign(self, wallet: &Wallet) -> BlockchainResult<SignedTransaction> {
        let hash = self.signing_hash()?;
        let signature = wallet.sign_hash(hash).await?;
        Ok(SignedTransaction {
            envelope: self,
            signature: hex::encode(signature.as_bytes()),
        })
    }
}

/// A signed envelope ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    envelope: TxEnvelope,
    signature: String,
}

impl SignedTransaction {
    pub fn envelope(&self) -> &TxEnvelope {
        &self.envelope
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The `CreateTransaction` parameter object.
    pub fn to_params(&self) -> serde_json::Value {
        let mut params = self.envelope.fields();
        params["signature"] = serde_json::Value::String(self.signature.clone());
        params
    }
}

/// Wait for a transaction receipt.
///
/// Looks the transaction up at most `policy.attempts` times, sleeping
/// `policy.interval_ms` between lookups.
pub async fn confirm<N: NetworkClient>(
    network: &N,
    tran_id: &TranId,
    policy: &ConfirmationConfig,
) -> BlockchainResult<ConfirmationStatus> {
    let interval = Duration::from_millis(policy.interval_ms);

    for attempt in 1..=policy.attempts {
        match network.get_transaction(tran_id).await? {
            Some(record) => {
                if let Some(receipt) = record.receipt {
                    if receipt.success {
                        return Ok(ConfirmationStatus::Confirmed {
                            cumulative_gas: receipt.cumulative_gas,
                        });
                    }
                    return Ok(ConfirmationStatus::Failed {
                        cumulative_gas: receipt.cumulative_gas,
                        errors: receipt.errors,
                    });
                }
                tracing::debug!(tran_id = %tran_id, attempt, "Transaction found without receipt");
            }
            None => tracing::debug!(tran_id = %tran_id, attempt, "Transaction pending"),
        }

        if attempt < policy.attempts {
            sleep(interval).await;
        }
    }

    Ok(ConfirmationStatus::TimedOut {
        attempts: policy.attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn envelope(wallet: &Wallet) -> TxEnvelope {
        TxEnvelope {
            version: 21823489,
            nonce: 4,
            to_addr: Address::repeat_byte(0x11),
            amount: U256::from(5_000_000u64),
            pub_key: wallet.public_key_hex(),
            gas: GasParams {
                price: U256::from(2_000_000_000u64),
                limit: 10_000,
            },
            code: String::new(),
            data: r#"{"_tag":"DidCreate"}"#.to_string(),
            priority: false,
        }
    }

    #[test]
    fn test_amounts_serialize_as_decimal_strings() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let fields = envelope(&wallet).fields();
        assert_eq!(fields["amount"], "5000000");
        assert_eq!(fields["gasPrice"], "2000000000");
        assert_eq!(fields["gasLimit"], "10000");
        assert_eq!(fields["toAddr"], "1111111111111111111111111111111111111111");
        assert_eq!(fields["nonce"], 4);
    }

    #[test]
    fn test_signing_hash_covers_nonce() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let first = envelope(&wallet);
        let mut second = first.clone();
        second.nonce += 1;
        assert_ne!(first.signing_hash().unwrap(), second.signing_hash().unwrap());
    }

    #[tokio::test]
    async fn test_signed_params_carry_signature() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let signed = envelope(&wallet).sign(&wallet).await.unwrap();
        assert_eq!(signed.signature().len(), 130);

        let params = signed.to_params();
        assert_eq!(params["signature"], signed.signature());
        assert_eq!(params["data"], r#"{"_tag":"DidCreate"}"#);
        assert_eq!(signed.envelope().nonce, 4);
    }
}
