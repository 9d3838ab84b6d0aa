//! Console rendering of orchestrator outcomes.

use crate::blockchain::types::ConfirmationStatus;
use crate::orchestrator::{DeployOutcome, ResolvedDid, TransactionOutcome};

pub fn render_transaction(outcome: &TransactionOutcome) -> String {
    let label = outcome
        .tag
        .map(|tag| tag.to_string())
        .unwrap_or_else(|| "Deployment".to_string());

    let mut lines = vec![
        format!("{} transaction ID: {}", label, outcome.tran_id),
        format!("The transaction is confirmed: {}", outcome.is_confirmed()),
    ];
    match &outcome.status {
        ConfirmationStatus::Confirmed { cumulative_gas } => {
            lines.push(format!("The {} tyronZIL transaction has been successful!", label));
            lines.push(format!("The total gas consumed was: {}", cumulative_gas));
        }
        ConfirmationStatus::Failed {
            cumulative_gas,
            errors,
        } => {
            lines.push(format!("The {} tyronZIL transaction has been unsuccessful!", label));
            lines.push(format!("The total gas consumed was: {}", cumulative_gas));
            if let Some(errors) = errors {
                lines.push(format!("Contract errors: {}", errors));
            }
        }
        ConfirmationStatus::TimedOut { attempts } => {
            lines.push(format!(
                "The {} tyronZIL transaction has been unsuccessful! No receipt after {} attempts",
                label, attempts
            ));
        }
    }
    lines.join("\n")
}

pub fn render_deploy(outcome: &DeployOutcome) -> String {
    let mut sections = vec![render_transaction(&outcome.deployment)];
    match outcome.contract_address {
        Some(address) => sections.push(format!("Your tyron-smart-contract address is: {}", address)),
        None if outcome.is_deployed() => {
            sections.push("Your tyron-smart-contract was deployed at an unknown address".to_string())
        }
        None => sections.push("Your tyron-smart-contract was not deployed".to_string()),
    }
    if let Some(init) = &outcome.initialization {
        sections.push(render_transaction(init));
        sections.push(format!(
            "Your tyron-smart-contract is initialized: {}",
            outcome.is_initialized()
        ));
    }
    if let Some(failure) = &outcome.failure {
        sections.push(format!("Your tyron-smart-contract is not initialized: {}", failure));
    }
    sections.push(format!("Total gas consumed: {}", outcome.total_gas()));
    sections.join("\n")
}

pub fn render_resolved(resolved: &ResolvedDid) -> String {
    let mut lines = vec![format!("Contract: {}", resolved.contract)];
    if let Some(did) = &resolved.did {
        lines.push(format!("DID: {}", did));
    }
    let body = resolved.document.as_ref().unwrap_or(&resolved.state);
    lines.push(serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string()));
    lines.join("\n")
}

pub fn print_transaction(outcome: &TransactionOutcome) {
    println!("{}", render_transaction(outcome));
}

pub fn print_deploy(outcome: &DeployOutcome) {
    println!("{}", render_deploy(outcome));
}

pub fn print_resolved(resolved: &ResolvedDid) {
    println!("{}", render_resolved(resolved));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::TranId;
    use crate::did::TransitionTag;
    use alloy::primitives::Address;

    fn outcome(status: ConfirmationStatus) -> TransactionOutcome {
        TransactionOutcome {
            tag: Some(TransitionTag::Recover),
            tran_id: TranId("0abc".to_string()),
            nonce: 3,
            status,
        }
    }

    #[test]
    fn test_confirmed() {
        let text = render_transaction(&outcome(ConfirmationStatus::Confirmed { cumulative_gas: 812 }));
        assert!(text.contains("DidRecover transaction ID: 0abc"));
        assert!(text.contains("confirmed: true"));
        assert!(text.contains("812"));
    }

    #[test]
    fn test_timed_out() {
        let text = render_transaction(&outcome(ConfirmationStatus::TimedOut { attempts: 33 }));
        assert!(text.contains("confirmed: false"));
        assert!(text.contains("unsuccessful"));
        assert!(text.contains("33 attempts"));
    }

    #[test]
    fn test_deploy_with_failed_init_shows_address() {
        let deploy = DeployOutcome {
            deployment: TransactionOutcome {
                tag: None,
                ..outcome(ConfirmationStatus::Confirmed { cumulative_gas: 900 })
            },
            contract_address: Some(Address::repeat_byte(0x42)),
            initialization: None,
            failure: Some("RPC error: rejected".to_string()),
        };
        let text = render_deploy(&deploy);
        assert!(text.contains("Deployment transaction ID: 0abc"));
        assert!(text.contains(&Address::repeat_byte(0x42).to_string()));
        assert!(text.contains("not initialized: RPC error: rejected"));
    }

    #[test]
    fn test_resolved_prefers_document() {
        let resolved = ResolvedDid {
            contract: Address::ZERO,
            did: Some("did:tyron:zil:test01".to_string()),
            document: Some(serde_json::json!({"doc": "x"})),
            state: serde_json::json!({"operation_cost": "1"}),
        };
        let text = render_resolved(&resolved);
        assert!(text.contains("DID: did:tyron:zil:test01"));
        assert!(text.contains("\"doc\": \"x\""));
        assert!(!text.contains("operation_cost"));
    }
}
