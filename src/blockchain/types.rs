//! Chain-specific types and error definitions.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// Re-export the network-facing config from the config module to avoid duplication
pub use crate::config::schema::{ConfirmationConfig, NetworkConfig, QA_PER_ZIL};

/// The two signer roles of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Pays per-operation fees.
    Client,
    /// Owns and initializes the identity contract.
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Client => write!(f, "client"),
            Role::User => write!(f, "user"),
        }
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC {method} returned error {code}: {message}")]
    RpcResponse {
        method: &'static str,
        code: i64,
        message: String,
    },

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The key's derived address is not the one recorded for its role.
    #[error("Wrong key for the {role}: expected address {expected}, derived {actual}")]
    IdentityMismatch {
        role: Role,
        expected: Address,
        actual: Address,
    },

    /// The account cannot cover the stake or initialization cost.
    #[error(
        "The {role}'s balance must be at least {} ZIL - current balance: {} ZIL",
        format_zil(.required),
        format_zil(.balance)
    )]
    InsufficientBalance {
        role: Role,
        balance: U256,
        required: U256,
    },

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// The user key is needed for deployment but was not supplied.
    #[error("Deployment requires the user's private key")]
    MissingUserKey,

    /// Contract source for a version could not be resolved.
    #[error("Contract code error: {0}")]
    ContractCode(String),

    /// Contract state is missing an expected field.
    #[error("Contract state error: {0}")]
    ContractState(String),

    /// The envelope or a response could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid contract initialization record.
    #[error("Invalid contract init: {0}")]
    InvalidInit(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Balance and nonce of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountState {
    /// Balance in Qa.
    pub balance: U256,
    /// Nonce of the last transaction sent by the account.
    pub nonce: u64,
}

/// Gas parameters fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasParams {
    /// Minimum network-quoted price per unit, in Qa.
    pub price: U256,
    /// Cap on computational units.
    pub limit: u64,
}

/// Transaction identifier returned by the network on broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranId(pub String);

impl std::fmt::Display for TranId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Receipt of a processed transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Receipt {
    /// Whether the transaction was applied.
    #[serde(default)]
    pub success: bool,
    /// Gas consumed up to and including this transaction.
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub cumulative_gas: u64,
    /// Error codes reported by the contract, if any.
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

/// A transaction as returned by a lookup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "ID")]
    pub id: TranId,
    #[serde(default)]
    pub receipt: Option<Receipt>,
}

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationStatus {
    /// Receipt found and the transaction succeeded.
    Confirmed { cumulative_gas: u64 },
    /// Receipt found but the transaction failed.
    Failed {
        cumulative_gas: u64,
        errors: Option<serde_json::Value>,
    },
    /// The polling budget was exhausted without a receipt.
    TimedOut { attempts: u32 },
}

impl ConfirmationStatus {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ConfirmationStatus::Confirmed { .. })
    }

    pub fn cumulative_gas(&self) -> Option<u64> {
        match self {
            ConfirmationStatus::Confirmed { cumulative_gas }
            | ConfirmationStatus::Failed { cumulative_gas, .. } => Some(*cumulative_gas),
            ConfirmationStatus::TimedOut { .. } => None,
        }
    }
}

/// Render an amount of Qa as ZIL, trimming trailing zeros.
pub fn format_zil(qa: &U256) -> String {
    let unit = U256::from(QA_PER_ZIL);
    let whole = *qa / unit;
    let fraction = *qa % unit;
    if fraction.is_zero() {
        return whole.to_string();
    }
    let digits = format!("{:0>12}", fraction.to_string());
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Parse a decimal Qa amount as the network reports it.
pub fn parse_qa(value: &str) -> BlockchainResult<U256> {
    U256::from_str_radix(value.trim(), 10)
        .map_err(|e| BlockchainError::Rpc(format!("Invalid amount '{}': {}", value, e)))
}

/// Accepts `"123"` or `123`; the network reports gas as strings.
pub(crate) fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}
