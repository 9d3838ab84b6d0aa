//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoint URLs and addresses parse
//! - Validate value ranges (gas limit > 0, polling budget > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TyronConfig → Result<(), Vec<ValidationError>>
//! - Empty contract addresses are accepted here; operations that need them
//!   fail when they build a `ContractInit`

use alloy::primitives::Address;
use tracing_subscriber::EnvFilter;

use crate::config::schema::TyronConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An endpoint URL did not parse.
    InvalidUrl { field: &'static str, value: String },
    /// An address did not parse as 20 hex bytes.
    InvalidAddress { field: &'static str, value: String },
    /// A numeric field must be positive.
    Zero { field: &'static str },
    /// The logging filter directive did not parse.
    InvalidLogLevel(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidUrl { field, value } => {
                write!(f, "{} is not a valid URL: '{}'", field, value)
            }
            ValidationError::InvalidAddress { field, value } => {
                write!(f, "{} is not a valid address: '{}'", field, value)
            }
            ValidationError::Zero { field } => write!(f, "{} must be greater than zero", field),
            ValidationError::InvalidLogLevel(level) => {
                write!(f, "logging.level is not a valid filter: '{}'", level)
            }
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &TyronConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.network.rpc_url().parse::<url::Url>().is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "network.rpc_url",
            value: config.network.rpc_url().to_string(),
        });
    }
    for failover in &config.network.failover_urls {
        if failover.parse::<url::Url>().is_err() {
            errors.push(ValidationError::InvalidUrl {
                field: "network.failover_urls",
                value: failover.clone(),
            });
        }
    }
    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "network.rpc_timeout_secs",
        });
    }

    let addresses = [
        ("contract.tyron_init", &config.contract.tyron_init),
        ("contract.contract_owner", &config.contract.contract_owner),
        ("contract.client_addr", &config.contract.client_addr),
    ];
    for (field, value) in addresses {
        if !value.is_empty() && value.parse::<Address>().is_err() {
            errors.push(ValidationError::InvalidAddress {
                field,
                value: value.clone(),
            });
        }
    }

    if config.gas.limit == 0 {
        errors.push(ValidationError::Zero { field: "gas.limit" });
    }
    if config.confirmation.attempts == 0 {
        errors.push(ValidationError::Zero {
            field: "confirmation.attempts",
        });
    }

    if EnvFilter::try_new(&config.logging.level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
