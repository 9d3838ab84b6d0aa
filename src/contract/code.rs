//! Resolution of versioned tyron-smart-contract source.

use alloy::primitives::{hex, Address};
use std::future::Future;
use std::path::PathBuf;

use crate::blockchain::network::NetworkClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Registry state field mapping versions to contract source.
pub const CONTRACTS_FIELD: &str = "contracts";

/// Supplies the contract source to deploy.
pub trait ContractSource: Send + Sync {
    fn code<N: NetworkClient>(
        &self,
        network: &N,
        registry: Address,
        version: &str,
    ) -> impl Future<Output = BlockchainResult<String>> + Send;
}

/// Reads the source published in the TyronInit registry's state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrySource;

impl ContractSource for RegistrySource {
    async fn code<N: NetworkClient>(
        &self,
        network: &N,
        registry: Address,
        version: &str,
    ) -> BlockchainResult<String> {
        let state = network.get_smart_contract_state(registry).await?;
        let encoded = state
            .get(CONTRACTS_FIELD)
            .and_then(|contracts| contracts.get(version))
            .and_then(|code| code.as_str())
            .ok_or_else(|| {
                BlockchainError::ContractCode(format!(
                    "version '{}' not published by registry {}",
                    version, registry
                ))
            })?;
        decode(encoded)
    }
}

/// Reads the source from a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContractSource for FileSource {
    async fn code<N: NetworkClient>(
        &self,
        _network: &N,
        _registry: Address,
        _version: &str,
    ) -> BlockchainResult<String> {
        let code = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            BlockchainError::ContractCode(format!("{}: {}", self.path.display(), e))
        })?;
        decode(&code)
    }
}

/// `0x`-prefixed values are hex-encoded UTF-8; anything else is plain source.
fn decode(encoded: &str) -> BlockchainResult<String> {
    let trimmed = encoded.trim();
    let Some(hex_body) = trimmed.strip_prefix("0x") else {
        return Ok(trimmed.to_string());
    };
    let bytes = hex::decode(hex_body)
        .map_err(|e| BlockchainError::ContractCode(format!("invalid hex source: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| BlockchainError::ContractCode(format!("source is not UTF-8: {}", e)))
}
