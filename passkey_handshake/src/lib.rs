//! passkey_handshake - Passkey checkout authentication handshake
//!
//! This crate coordinates a host checkout page, an embedded frame running the
//! actual WebAuthn ceremony, and a proxied three-step transaction lifecycle
//! (create, validate, close). The host never touches credential material
//! directly: it drives the exchange over a single-use correlated message
//! channel and reports one structured outcome per attempt.

mod channel;
mod coordination;
mod lifecycle;

// Re-export the main coordination components
pub use coordination::{
    AttemptOutcome, AttemptState, AuthenticationOrchestrator, HandshakeError, Presenter,
};

pub use channel::{
    CeremonyAssertion, CeremonyFault, CeremonyFrame, CeremonyOutcome, CeremonyRequest,
    ChannelError, CorrelatedChannel, FrameMessage, FramePort, authenticate_envelope,
};

pub use lifecycle::{
    CloseRequest, ClosedTransaction, CreatedTransaction, HttpLifecycleClient, LifecycleApi,
    LifecycleError, ValidationReport, synthesize_fallback_token,
};
