//! tyronZIL: decentralized identity client for the Zilliqa network

pub mod blockchain;
pub mod config;
pub mod contract;
pub mod did;
pub mod observability;
pub mod orchestrator;
pub mod report;

pub use config::TyronConfig;
pub use orchestrator::{DeployOutcome, TransactionOutcome, TyronSession};
