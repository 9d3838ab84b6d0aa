//! Reading a DID back from its contract.

use alloy::primitives::Address;
use serde_json::Value;

use crate::blockchain::network::NetworkClient;
use crate::blockchain::types::BlockchainResult;
use crate::orchestrator::outcome::ResolvedDid;

const DID_FIELD: &str = "didtyron";
const DOCUMENT_FIELD: &str = "doc";

/// Fetch the contract state at `contract` and extract its DID and document.
///
/// A document stored as a JSON string is parsed; if it is not JSON it is
/// returned as a string value.
pub async fn resolve<N: NetworkClient>(network: &N, contract: Address) -> BlockchainResult<ResolvedDid> {
    let state = network.get_smart_contract_state(contract).await?;

    let did = state
        .get(DID_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string);
    let document = state.get(DOCUMENT_FIELD).map(|doc| match doc {
        Value::String(text) => serde_json::from_str(text).unwrap_or_else(|_| doc.clone()),
        other => other.clone(),
    });

    tracing::debug!(contract = %contract, did = ?did, "Resolved contract state");
    Ok(ResolvedDid {
        contract,
        did,
        document,
        state,
    })
}
