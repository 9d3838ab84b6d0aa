//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.
//! Private keys are deliberately absent: they only ever come from the
//! environment or the command line.

use serde::{Deserialize, Serialize};

/// Number of Qa (the smallest unit) in one ZIL.
pub const QA_PER_ZIL: u64 = 1_000_000_000_000;

/// Root configuration for the tyronZIL client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TyronConfig {
    /// Network endpoint settings.
    pub network: NetworkConfig,

    /// Addresses and stake recorded for the identity contract.
    pub contract: ContractInitConfig,

    /// Gas settings.
    pub gas: GasConfig,

    /// Confirmation polling budget.
    pub confirmation: ConfirmationConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Network namespace the DID is anchored on.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkNamespace {
    Mainnet,
    #[default]
    Testnet,
}

impl NetworkNamespace {
    /// Chain ID used in the transaction version field.
    pub fn chain_id(self) -> u32 {
        match self {
            NetworkNamespace::Mainnet => 1,
            NetworkNamespace::Testnet => 333,
        }
    }

    /// Public API endpoint for the namespace.
    pub fn default_rpc_url(self) -> &'static str {
        match self {
            NetworkNamespace::Mainnet => "https://api.zilliqa.com",
            NetworkNamespace::Testnet => "https://dev-api.zilliqa.com",
        }
    }
}

impl std::fmt::Display for NetworkNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkNamespace::Mainnet => write!(f, "mainnet"),
            NetworkNamespace::Testnet => write!(f, "testnet"),
        }
    }
}

/// Network endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Mainnet or testnet.
    pub namespace: NetworkNamespace,

    /// JSON-RPC endpoint URL. Falls back to the namespace's public endpoint.
    pub rpc_url: Option<String>,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Message version combined with the chain ID.
    pub msg_version: u32,

    /// Honour HTTP(S)_PROXY from the environment.
    pub system_proxy: bool,
}

impl NetworkConfig {
    /// The primary endpoint, configured or derived from the namespace.
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.namespace.default_rpc_url())
    }

    /// Transaction version: `(chain_id << 16) + msg_version`.
    pub fn version(&self) -> u32 {
        (self.namespace.chain_id() << 16) + self.msg_version
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            namespace: NetworkNamespace::Testnet,
            rpc_url: None,
            failover_urls: Vec::new(),
            rpc_timeout_secs: 10,
            msg_version: 1,
            system_proxy: true,
        }
    }
}

/// Initialization record for the tyron-smart-contract.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractInitConfig {
    /// Address of the TyronInit registry contract.
    pub tyron_init: String,

    /// Address owning the user's identity contract.
    pub contract_owner: String,

    /// Address of the client that pays per-operation fees.
    pub client_addr: String,

    /// Minimum client balance, in Qa.
    pub tyron_stake: u64,
}

impl Default for ContractInitConfig {
    fn default() -> Self {
        Self {
            tyron_init: String::new(),
            contract_owner: String::new(),
            client_addr: String::new(),
            tyron_stake: 100 * QA_PER_ZIL,
        }
    }
}

/// Gas configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GasConfig {
    /// Cap on computational units per transaction.
    pub limit: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self { limit: 10_000 }
    }
}

/// Confirmation polling budget.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Number of receipt lookups before giving up.
    pub attempts: u32,

    /// Delay between lookups in milliseconds.
    pub interval_ms: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            attempts: 33,
            interval_ms: 1000,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (e.g. "info" or "tyronzil=debug").
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "tyronzil=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
