//! The transition payload carried in a transaction's `data` field.
//!
//! The contract's dispatcher reads `_tag`, `_amount`, `_sender` and `params`
//! by name, with `params` in declaration order. Field order in the JSON
//! follows the struct.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::did::operations::{bystr20, TransitionParam, TransitionTag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Transition to be invoked.
    #[serde(rename = "_tag")]
    pub tag: TransitionTag,
    /// Qa transferred with the call, as a decimal string.
    #[serde(rename = "_amount")]
    pub amount: String,
    /// Address of the invoker.
    #[serde(rename = "_sender")]
    pub sender: String,
    pub params: Vec<TransitionParam>,
}

impl Transition {
    pub fn new(
        tag: TransitionTag,
        amount: U256,
        sender: Address,
        params: Vec<TransitionParam>,
    ) -> Self {
        Self {
            tag,
            amount: amount.to_string(),
            sender: bystr20(sender),
            params,
        }
    }

    /// Compact JSON for the envelope's `data` field.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
