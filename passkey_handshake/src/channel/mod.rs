//! Host-to-frame ceremony channel
//!
//! The WebAuthn ceremony itself runs inside an embedded frame on the other
//! side of a security boundary. This module owns the message pathway to that
//! frame: a private, single-use port pair carrying exactly one authenticate
//! request and at most one terminal response, bounded by a timeout.

mod config;
mod correlated;
mod errors;
mod frame;
mod types;

pub use correlated::CorrelatedChannel;
pub use errors::ChannelError;
pub use frame::CeremonyFrame;
pub use types::{
    CeremonyAssertion, CeremonyFault, CeremonyOutcome, CeremonyRequest, FrameMessage, FramePort,
    authenticate_envelope,
};
