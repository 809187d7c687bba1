use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::channel::{CeremonyOutcome, CeremonyRequest, ChannelError, CorrelatedChannel};
use crate::lifecycle::LifecycleApi;

use super::errors::HandshakeError;
use super::types::{AttemptOutcome, AttemptState, Presenter};

/// State machine driving a single end-to-end authentication attempt.
///
/// One orchestrator serves one trigger surface. It is not reentrant: while an
/// attempt is between `Validating` and its terminal state, further triggers
/// are rejected with [`HandshakeError::AlreadyInProgress`]. Every accepted
/// trigger produces exactly one outcome event on the presenter.
///
/// Collaborators arrive by injection; nothing here reaches for globals.
pub struct AuthenticationOrchestrator {
    lifecycle: Arc<dyn LifecycleApi>,
    channel: CorrelatedChannel,
    presenter: Arc<dyn Presenter>,
    in_flight: AtomicBool,
}

impl AuthenticationOrchestrator {
    pub fn new(
        lifecycle: Arc<dyn LifecycleApi>,
        channel: CorrelatedChannel,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            lifecycle,
            channel,
            presenter,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Runs one authentication attempt for the payer.
    ///
    /// `Err` is returned only for a rejected concurrent trigger; every
    /// accepted trigger resolves to `Ok` with its terminal outcome, already
    /// reported to the presenter.
    pub async fn authenticate(&self, user_id: &str) -> Result<AttemptOutcome, HandshakeError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(HandshakeError::AlreadyInProgress.log());
        }

        let outcome = self.run_attempt(user_id).await;
        self.enter(outcome.state());
        self.presenter.on_outcome(&outcome);
        self.in_flight.store(false, Ordering::Release);
        Ok(outcome)
    }

    fn enter(&self, state: AttemptState) {
        tracing::debug!("Attempt state: {:?}", state);
        self.presenter.on_state_change(state);
    }

    async fn run_attempt(&self, user_id: &str) -> AttemptOutcome {
        self.enter(AttemptState::Validating);
        if user_id.trim().is_empty() {
            return AttemptOutcome::failed(
                HandshakeError::InputValidation("user id must not be empty".into()).log(),
            );
        }

        self.enter(AttemptState::AwaitingCreate);
        let created = match self.lifecycle.create(user_id).await {
            Ok(created) => created,
            Err(e) => return AttemptOutcome::failed(HandshakeError::from(e).log()),
        };

        self.enter(AttemptState::AwaitingCeremony);
        let request = CeremonyRequest::new(user_id, &created.id);
        match self.channel.send_and_await(request).await {
            Ok(CeremonyOutcome::Authenticated(assertion)) => {
                // The frame's token doubles as the transaction code when the
                // ceremony did not report one explicitly
                let transaction_code = assertion
                    .transaction_code
                    .clone()
                    .or_else(|| Some(assertion.token.clone()));
                let security_token = assertion
                    .security_token
                    .clone()
                    .unwrap_or_else(|| assertion.token.clone());

                // The ceremony success is authoritative; closing the
                // transaction is bookkeeping and must not revert it
                match self
                    .lifecycle
                    .close(&created.id, transaction_code.as_deref())
                    .await
                {
                    Ok(closed) => tracing::debug!(
                        "Transaction {} closed (fallback: {})",
                        created.id,
                        closed.fallback
                    ),
                    Err(e) => tracing::warn!(
                        "Close failed for {}, keeping ceremony result: {}",
                        created.id,
                        e
                    ),
                }

                AttemptOutcome::Succeeded {
                    transaction_id: created.id,
                    security_token,
                    session_id: assertion.session_id,
                    transaction_code,
                }
            }
            Ok(CeremonyOutcome::Faulted(fault)) => {
                AttemptOutcome::failed(HandshakeError::Ceremony(fault).log())
            }
            Ok(CeremonyOutcome::Cancelled) => AttemptOutcome::Cancelled,
            Err(ChannelError::Timeout { timeout_ms }) => {
                tracing::warn!("Attempt for {} timed out after {} ms", created.id, timeout_ms);
                AttemptOutcome::TimedOut
            }
            Err(e) => AttemptOutcome::failed(HandshakeError::from(e).log()),
        }
    }
}
