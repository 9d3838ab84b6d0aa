//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! tyronzil.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → TyronConfig (validated, immutable)
//!     → handed to the session and the network client
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ConfirmationConfig, ContractInitConfig, GasConfig, LogFormat, LoggingConfig, NetworkConfig,
    NetworkNamespace, TyronConfig, QA_PER_ZIL,
};
