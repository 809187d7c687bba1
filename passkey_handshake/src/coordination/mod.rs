//! Authentication coordination module
//!
//! This module drives one end-to-end authentication attempt: it validates
//! input, creates a lifecycle transaction, delegates the ceremony to the
//! embedded frame over the correlated channel, interprets the result and
//! finishes with a best-effort close. It is the main entry point of the
//! crate.
//!
//! The module is divided into several submodules:
//! - `errors`: error taxonomy for a whole attempt
//! - `orchestrator`: the state machine itself
//! - `types`: attempt states, outcomes and the presenter sink trait

mod errors;
mod orchestrator;
mod types;

pub use errors::HandshakeError;
pub use orchestrator::AuthenticationOrchestrator;
pub use types::{AttemptOutcome, AttemptState, Presenter};
