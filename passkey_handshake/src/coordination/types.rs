use super::errors::HandshakeError;

/// States of one authentication attempt.
///
/// An attempt walks `Idle → Validating → AwaitingCreate → AwaitingCeremony`
/// and ends in exactly one of the four terminal states. No transitions happen
/// after a terminal state is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Idle,
    Validating,
    AwaitingCreate,
    AwaitingCeremony,
    Succeeded,
    Failed,
    Cancelled,
    TimedOut,
}

impl AttemptState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::Cancelled | Self::TimedOut
        )
    }
}

/// Terminal outcome of one attempt, reported to the presenter exactly once.
#[derive(Debug)]
pub enum AttemptOutcome {
    Succeeded {
        transaction_id: String,
        /// Opaque credential authorizing downstream payment-method retrieval
        security_token: String,
        session_id: Option<String>,
        transaction_code: Option<String>,
    },
    Failed {
        error: HandshakeError,
        retriable: bool,
    },
    /// The user aborted the ceremony; retry is always reasonable
    Cancelled,
    /// The frame never answered within the timeout; retry is always reasonable
    TimedOut,
}

impl AttemptOutcome {
    pub(super) fn failed(error: HandshakeError) -> Self {
        let retriable = error.is_retriable();
        Self::Failed { error, retriable }
    }

    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Succeeded { .. } => false,
            Self::Failed { retriable, .. } => *retriable,
            Self::Cancelled | Self::TimedOut => true,
        }
    }

    pub fn state(&self) -> AttemptState {
        match self {
            Self::Succeeded { .. } => AttemptState::Succeeded,
            Self::Failed { .. } => AttemptState::Failed,
            Self::Cancelled => AttemptState::Cancelled,
            Self::TimedOut => AttemptState::TimedOut,
        }
    }
}

/// Sink for attempt progress and results.
///
/// UI affordances (disabling the trigger control, spinners, result panes)
/// hang off these callbacks; the orchestrator itself knows nothing about the
/// target UI framework.
pub trait Presenter: Send + Sync {
    fn on_state_change(&self, state: AttemptState);
    fn on_outcome(&self, outcome: &AttemptOutcome);
}
