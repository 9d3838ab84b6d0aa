//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! session, client, confirmation polling
//!     → tracing events with structured fields (addresses, nonces, tran ids, gas)
//!     → logging.rs subscriber (stderr, pretty or JSON)
//! ```

pub mod logging;

pub use logging::init_logging;
