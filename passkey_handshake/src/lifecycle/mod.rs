//! Transaction lifecycle client
//!
//! The remote authentication service bounds every attempt with a three-step
//! transaction protocol (create, validate, close), reached through a trusted
//! proxy. This module holds the stateless HTTP client for those calls and the
//! silent-degrade policy for `close`.

mod client;
mod errors;
mod types;

pub use client::{HttpLifecycleClient, LifecycleApi};
pub use errors::LifecycleError;
pub use types::{
    CloseRequest, ClosedTransaction, CreatedTransaction, ValidationReport,
    synthesize_fallback_token,
};
