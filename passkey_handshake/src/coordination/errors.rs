//! Error types for a whole authentication attempt

use thiserror::Error;

use crate::channel::{CeremonyFault, ChannelError};
use crate::lifecycle::LifecycleError;

/// Errors that can terminate an authentication attempt.
#[derive(Error, Debug)]
pub enum HandshakeError {
    /// A required field was missing or empty; fails fast, never retried
    #[error("Input validation error: {0}")]
    InputValidation(String),

    /// A concurrent trigger was rejected while an attempt is in flight
    #[error("An authentication attempt is already in progress")]
    AlreadyInProgress,

    /// Error from a lifecycle call (create/validate)
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Error from the frame channel (timeout, disconnect)
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Failure reported by the frame's ceremony
    #[error("Ceremony error: {0}")]
    Ceremony(CeremonyFault),
}

impl HandshakeError {
    /// Log the error and return self
    ///
    /// Allows method chaining at the point where an attempt turns terminal.
    pub fn log(self) -> Self {
        match &self {
            Self::InputValidation(msg) => tracing::error!("Input validation error: {}", msg),
            Self::AlreadyInProgress => {
                tracing::warn!("Rejected trigger: attempt already in progress")
            }
            Self::Lifecycle(err) => tracing::error!("Lifecycle error: {}", err),
            Self::Channel(err) => tracing::error!("Channel error: {}", err),
            Self::Ceremony(fault) => tracing::error!("Ceremony error: {}", fault),
        }
        self
    }

    /// Whether a fresh attempt is worth suggesting to the user.
    ///
    /// Transport hiccups and frame disconnects are transient; upstream
    /// rejections and bad input are not. Ceremony faults carry the frame's
    /// own verdict verbatim.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::InputValidation(_) | Self::AlreadyInProgress => false,
            Self::Lifecycle(LifecycleError::Network(_)) => true,
            Self::Lifecycle(_) => false,
            Self::Channel(_) => true,
            Self::Ceremony(fault) => fault.retriable.unwrap_or(false),
        }
    }
}
