//! Submitting DID operations to a deployed identity contract.

use alloy::primitives::{Address, U256};
use serde_json::Value;

use crate::blockchain::network::NetworkClient;
use crate::blockchain::types::{parse_qa, BlockchainError, BlockchainResult};
use crate::did::{Transition, TransitionParam, TransitionTag};
use crate::orchestrator::outcome::TransactionOutcome;
use crate::orchestrator::session::TyronSession;

/// Contract state field holding the fee charged per operation.
pub const OPERATION_COST_FIELD: &str = "operation_cost";

impl<N: NetworkClient> TyronSession<N> {
    /// Invoke `tag` on the contract at `contract` with `params`, paid and
    /// signed by the client.
    ///
    /// An unconfirmed transaction is a successful call with
    /// `is_confirmed() == false`; only failures before or during the
    /// broadcast are errors.
    pub async fn submit(
        &self,
        contract: Address,
        tag: TransitionTag,
        params: Vec<TransitionParam>,
    ) -> BlockchainResult<TransactionOutcome> {
        tracing::info!(%tag, contract = %contract, "Processing tyronZIL transaction");

        let state = self.network().get_smart_contract_state(contract).await?;
        let amount = operation_cost(&state)?;

        let client = self.client();
        let transition = Transition::new(tag, amount, client.address(), params);
        let data = transition.to_json()?;

        let outcome = self
            .send(client, contract, amount, String::new(), data, Some(tag))
            .await?;
        if outcome.is_confirmed() {
            tracing::info!(%tag, tran_id = %outcome.tran_id, "tyronZIL transaction successful");
        } else {
            tracing::warn!(%tag, tran_id = %outcome.tran_id, status = ?outcome.status, "tyronZIL transaction unsuccessful");
        }
        Ok(outcome)
    }
}

/// Read the operation fee from contract state. Accepts a decimal string or a number.
pub fn operation_cost(state: &Value) -> BlockchainResult<U256> {
    match state.get(OPERATION_COST_FIELD) {
        Some(Value::String(cost)) => parse_qa(cost),
        Some(Value::Number(cost)) => parse_qa(&cost.to_string()),
        Some(other) => Err(BlockchainError::ContractState(format!(
            "{} has unexpected value {}",
            OPERATION_COST_FIELD, other
        ))),
        None => Err(BlockchainError::ContractState(format!(
            "{} missing from contract state",
            OPERATION_COST_FIELD
        ))),
    }
}
