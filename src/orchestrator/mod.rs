//! Transaction orchestration for DID operations.
//!
//! # Data Flow
//! ```text
//! TyronSession::initialize
//!     → minimum gas price
//!     → client key/address + stake check (user key/address + init cost)
//!
//! TyronSession::submit(contract, tag, params)
//!     → operation_cost from contract state
//!     → Transition { _tag, _amount, _sender, params } into TxEnvelope.data
//!     → sign (client, nonce + 1) → broadcast → confirm
//!     → TransactionOutcome
//!
//! TyronSession::deploy(source, version)
//!     → contract source → deploy (user, nonce + 1) → confirm
//!     → ContractInit(clientAddress) (user, nonce + 1) → confirm
//!     → DeployOutcome
//! ```
//!
//! Stages run strictly in order and stop at the first error. Nothing is
//! retried; the caller re-invokes.

pub mod deploy;
pub mod outcome;
pub mod resolve;
pub mod session;
pub mod submit;

pub use outcome::{DeployOutcome, ResolvedDid, TransactionOutcome};
pub use resolve::resolve;
pub use session::{SessionSettings, TyronSession, USER_INIT_COST};
pub use submit::operation_cost;
