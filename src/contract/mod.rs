//! The tyron-smart-contract: its initialization record and where its source comes from.

pub mod code;
pub mod init;

pub use code::{ContractSource, FileSource, RegistrySource};
pub use init::ContractInit;
