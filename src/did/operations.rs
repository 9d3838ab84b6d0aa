//! Parameter lists for the identity contract's transitions.
//!
//! Each builder returns its parameters in the positional order the contract
//! declares them. Values are passed through untouched; hashing and document
//! validation belong to the DID method layer.

use alloy::primitives::{hex, Address};
use serde::{Deserialize, Serialize};

/// Transitions exposed by the tyron-smart-contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionTag {
    #[serde(rename = "DidCreate")]
    Create,
    #[serde(rename = "DidUpdate")]
    Update,
    #[serde(rename = "DidRecover")]
    Recover,
    #[serde(rename = "DidDeactivate")]
    Deactivate,
    /// Called once right after deployment.
    ContractInit,
}

impl TransitionTag {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionTag::Create => "DidCreate",
            TransitionTag::Update => "DidUpdate",
            TransitionTag::Recover => "DidRecover",
            TransitionTag::Deactivate => "DidDeactivate",
            TransitionTag::ContractInit => "ContractInit",
        }
    }
}

impl std::fmt::Display for TransitionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed transition or init parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionParam {
    pub vname: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: String,
}

impl TransitionParam {
    pub fn new(vname: &str, ty: &str, value: impl Into<String>) -> Self {
        Self {
            vname: vname.to_string(),
            ty: ty.to_string(),
            value: value.into(),
        }
    }

    /// A `String`-typed parameter.
    pub fn string(vname: &str, value: impl Into<String>) -> Self {
        Self::new(vname, "String", value)
    }
}

/// `ByStr20` rendering: lowercase hex with a `0x` prefix, no checksum casing.
pub fn bystr20(address: Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// `DidCreate(didtyron, doc, updateCommitment, recoveryCommitment)`
pub fn create(
    didtyron: &str,
    doc: &str,
    update_commitment: &str,
    recovery_commitment: &str,
) -> Vec<TransitionParam> {
    vec![
        TransitionParam::string("didtyron", didtyron),
        TransitionParam::string("doc", doc),
        TransitionParam::string("updateCommitment", update_commitment),
        TransitionParam::string("recoveryCommitment", recovery_commitment),
    ]
}

/// `DidUpdate(updateCommitment, newDoc, newUpdateCommitment)`
pub fn update(
    update_commitment: &str,
    new_doc: &str,
    new_update_commitment: &str,
) -> Vec<TransitionParam> {
    vec![
        TransitionParam::string("updateCommitment", update_commitment),
        TransitionParam::string("newDoc", new_doc),
        TransitionParam::string("newUpdateCommitment", new_update_commitment),
    ]
}

/// `DidRecover(recoveryCommitment, newDoc, newUpdateCommitment, newRecoveryCommitment)`
pub fn recover(
    recovery_commitment: &str,
    new_doc: &str,
    new_update_commitment: &str,
    new_recovery_commitment: &str,
) -> Vec<TransitionParam> {
    vec![
        TransitionParam::string("recoveryCommitment", recovery_commitment),
        TransitionParam::string("newDoc", new_doc),
        TransitionParam::string("newUpdateCommitment", new_update_commitment),
        TransitionParam::string("newRecoveryCommitment", new_recovery_commitment),
    ]
}

/// `DidDeactivate(recoveryCommitment)`
pub fn deactivate(recovery_commitment: &str) -> Vec<TransitionParam> {
    vec![TransitionParam::string("recoveryCommitment", recovery_commitment)]
}

/// `ContractInit(clientAddress)`
pub fn contract_init(client_addr: Address) -> Vec<TransitionParam> {
    vec![TransitionParam::string("clientAddress", bystr20(client_addr))]
}

/// Immutable parameters of a freshly deployed tyron-smart-contract.
pub fn init_params(tyron_init: Address, contract_owner: Address) -> Vec<TransitionParam> {
    vec![
        TransitionParam::new("_scilla_version", "Uint32", "0"),
        TransitionParam::new("tyron_init", "ByStr20", bystr20(tyron_init)),
        TransitionParam::new("contract_owner", "ByStr20", bystr20(contract_owner)),
    ]
}
