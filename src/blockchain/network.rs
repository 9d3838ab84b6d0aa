//! The network seam consumed by the orchestrator.
//!
//! Everything the orchestrator needs from the chain goes through
//! [`NetworkClient`], so sessions can run against [`ZilliqaClient`] in
//! production and a scripted double in tests.
//!
//! [`ZilliqaClient`]: crate::blockchain::ZilliqaClient

use alloy::primitives::{Address, U256};
use std::future::Future;
use std::sync::Arc;

use crate::blockchain::transaction::SignedTransaction;
use crate::blockchain::types::{AccountState, BlockchainResult, TranId, TransactionRecord};

/// Read and write access to the identity registry's network.
pub trait NetworkClient: Send + Sync {
    /// Balance and nonce of `address`. Unknown accounts report zero for both.
    fn get_balance(
        &self,
        address: Address,
    ) -> impl Future<Output = BlockchainResult<AccountState>> + Send;

    /// Minimum gas price accepted by the network, in Qa.
    fn get_minimum_gas_price(&self) -> impl Future<Output = BlockchainResult<U256>> + Send;

    /// Full mutable state of a contract.
    fn get_smart_contract_state(
        &self,
        address: Address,
    ) -> impl Future<Output = BlockchainResult<serde_json::Value>> + Send;

    /// Broadcast a signed transaction.
    fn create_transaction(
        &self,
        tx: &SignedTransaction,
    ) -> impl Future<Output = BlockchainResult<TranId>> + Send;

    /// Look up a transaction. `None` while it is not yet present on chain.
    fn get_transaction(
        &self,
        id: &TranId,
    ) -> impl Future<Output = BlockchainResult<Option<TransactionRecord>>> + Send;

    /// Address of the contract created by a deployment transaction.
    fn get_contract_address_from_transaction(
        &self,
        id: &TranId,
    ) -> impl Future<Output = BlockchainResult<Address>> + Send;
}

impl<T: NetworkClient> NetworkClient for Arc<T> {
    fn get_balance(
        &self,
        address: Address,
    ) -> impl Future<Output = BlockchainResult<AccountState>> + Send {
        (**self).get_balance(address)
    }

    fn get_minimum_gas_price(&self) -> impl Future<Output = BlockchainResult<U256>> + Send {
        (**self).get_minimum_gas_price()
    }

    fn get_smart_contract_state(
        &self,
        address: Address,
    ) -> impl Future<Output = BlockchainResult<serde_json::Value>> + Send {
        (**self).get_smart_contract_state(address)
    }

    fn create_transaction(
        &self,
        tx: &SignedTransaction,
    ) -> impl Future<Output = BlockchainResult<TranId>> + Send {
        (**self).create_transaction(tx)
    }

    fn get_transaction(
        &self,
        id: &TranId,
    ) -> impl Future<Output = BlockchainResult<Option<TransactionRecord>>> + Send {
        (**self).get_transaction(id)
    }

    fn get_contract_address_from_transaction(
        &self,
        id: &TranId,
    ) -> impl Future<Output = BlockchainResult<Address>> + Send {
        (**self).get_contract_address_from_transaction(id)
    }
}
