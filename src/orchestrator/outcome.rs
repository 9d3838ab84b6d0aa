//! Structured results of orchestrator operations.

use alloy::primitives::Address;

use crate::blockchain::types::{ConfirmationStatus, TranId};
use crate::did::TransitionTag;

/// Result of one broadcast transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionOutcome {
    /// Transition invoked, `None` for a deployment.
    pub tag: Option<TransitionTag>,
    pub tran_id: TranId,
    /// Nonce the transaction carried.
    pub nonce: u64,
    pub status: ConfirmationStatus,
}

impl TransactionOutcome {
    pub fn is_confirmed(&self) -> bool {
        self.status.is_confirmed()
    }

    pub fn cumulative_gas(&self) -> Option<u64> {
        self.status.cumulative_gas()
    }
}

/// Result of deploying and initializing an identity contract.
///
/// A confirmed deployment followed by a failed `ContractInit` leaves a
/// contract that exists but is not initialized; nothing is rolled back.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployOutcome {
    pub deployment: TransactionOutcome,
    /// Set once the deployment is confirmed and its address is known.
    pub contract_address: Option<Address>,
    /// The `ContractInit` call, if it was broadcast.
    pub initialization: Option<TransactionOutcome>,
    /// Error that stopped the steps after a confirmed deployment: the
    /// contract address lookup or the `ContractInit` broadcast.
    pub failure: Option<String>,
}

impl DeployOutcome {
    pub fn is_deployed(&self) -> bool {
        self.deployment.is_confirmed()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialization
            .as_ref()
            .is_some_and(TransactionOutcome::is_confirmed)
    }

    /// Gas of both steps, counting only steps that produced a receipt.
    pub fn total_gas(&self) -> u64 {
        let init_gas = self
            .initialization
            .as_ref()
            .and_then(TransactionOutcome::cumulative_gas)
            .unwrap_or(0);
        self.deployment.cumulative_gas().unwrap_or(0) + init_gas
    }
}

/// A DID contract read back from chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDid {
    pub contract: Address,
    /// The DID recorded in the contract, when present.
    pub did: Option<String>,
    /// The DID document recorded in the contract, when present.
    pub document: Option<serde_json::Value>,
    /// Full contract state.
    pub state: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: ConfirmationStatus) -> TransactionOutcome {
        TransactionOutcome {
            tag: None,
            tran_id: TranId("t".to_string()),
            nonce: 1,
            status,
        }
    }

    #[test]
    fn test_partial_deployment() {
        let deploy = DeployOutcome {
            deployment: outcome(ConfirmationStatus::Confirmed { cumulative_gas: 900 }),
            contract_address: Some(Address::ZERO),
            initialization: Some(outcome(ConfirmationStatus::TimedOut { attempts: 33 })),
            failure: None,
        };
        assert!(deploy.is_deployed());
        assert!(!deploy.is_initialized());
        assert_eq!(deploy.total_gas(), 900);
    }

    #[test]
    fn test_total_gas() {
        let deploy = DeployOutcome {
            deployment: outcome(ConfirmationStatus::Confirmed { cumulative_gas: 900 }),
            contract_address: Some(Address::ZERO),
            initialization: Some(outcome(ConfirmationStatus::Confirmed { cumulative_gas: 100 })),
            failure: None,
        };
        assert!(deploy.is_initialized());
        assert_eq!(deploy.total_gas(), 1000);
    }

    #[test]
    fn test_init_never_sent() {
        let deploy = DeployOutcome {
            deployment: outcome(ConfirmationStatus::Confirmed { cumulative_gas: 900 }),
            contract_address: Some(Address::ZERO),
            initialization: None,
            failure: Some("RPC error: rejected".to_string()),
        };
        assert!(deploy.is_deployed());
        assert!(!deploy.is_initialized());
        assert_eq!(deploy.total_gas(), 900);
    }
}
