//! Validated initialization record of a user's identity contract.

use alloy::primitives::{Address, U256};

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::ContractInitConfig;

/// Addresses and stake a session is validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInit {
    /// The TyronInit registry contract.
    pub tyron_init: Address,
    /// Owner of the user's identity contract.
    pub contract_owner: Address,
    /// Client paying per-operation fees.
    pub client_addr: Address,
    /// Minimum client balance, in Qa.
    pub tyron_stake: U256,
}

impl ContractInit {
    /// Build from configuration. Every address is required.
    pub fn from_config(config: &ContractInitConfig) -> BlockchainResult<Self> {
        Ok(Self {
            tyron_init: parse_address("tyron_init", &config.tyron_init)?,
            contract_owner: parse_address("contract_owner", &config.contract_owner)?,
            client_addr: parse_address("client_addr", &config.client_addr)?,
            tyron_stake: U256::from(config.tyron_stake),
        })
    }
}

fn parse_address(field: &str, value: &str) -> BlockchainResult<Address> {
    if value.is_empty() {
        return Err(BlockchainError::InvalidInit(format!("{} is not set", field)));
    }
    value
        .parse()
        .map_err(|e| BlockchainError::InvalidInit(format!("{} '{}': {}", field, value, e)))
}
