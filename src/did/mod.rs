//! DID operations as contract transitions.
//!
//! # Data Flow
//! ```text
//! DID arguments (did, document, commitments)
//!     → operations.rs (ordered, typed parameter list)
//!     → transition.rs (tagged payload serialized into `data`)
//! ```

pub mod operations;
pub mod transition;

pub use operations::{bystr20, TransitionParam, TransitionTag};
pub use transition::Transition;
