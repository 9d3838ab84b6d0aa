//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables / CLI flags (private keys)
//!     → wallet.rs (key loading, signing, nonce tracking)
//!     → network.rs (the NetworkClient seam)
//!     → client.rs (JSON-RPC connection with timeouts and failover)
//!     → transaction.rs (build, sign, confirm)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables or explicit flags
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod network;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::ZilliqaClient;
pub use network::NetworkClient;
pub use transaction::{confirm, SignedTransaction, TxEnvelope};
pub use types::{
    AccountState, BlockchainError, BlockchainResult, ConfirmationStatus, GasParams, Receipt, Role,
    TranId, TransactionRecord,
};
pub use wallet::Wallet;
