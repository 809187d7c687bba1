use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use super::config::CEREMONY_TIMEOUT_MS;
use super::errors::ChannelError;
use super::frame::CeremonyFrame;
use super::types::{CeremonyOutcome, CeremonyRequest, FrameMessage, authenticate_envelope};

/// One-shot, timeout-bounded request/response exchange with the embedded frame.
///
/// Every call to [`send_and_await`](Self::send_and_await) constructs a fresh
/// private port pair, so a response can never leak across attempts. The
/// receiving end is dropped as soon as the exchange resolves, which makes
/// duplicate or late messages land on a closed port.
pub struct CorrelatedChannel {
    frame: Arc<dyn CeremonyFrame>,
    timeout: Duration,
}

impl CorrelatedChannel {
    /// Channel with the configured ceremony timeout (default 60 seconds).
    pub fn new(frame: Arc<dyn CeremonyFrame>) -> Self {
        Self::with_timeout(frame, Duration::from_millis(*CEREMONY_TIMEOUT_MS))
    }

    pub fn with_timeout(frame: Arc<dyn CeremonyFrame>, timeout: Duration) -> Self {
        Self { frame, timeout }
    }

    /// Sends the authenticate request and waits for one terminal response.
    ///
    /// Waits for the frame to finish loading, transmits the envelope with a
    /// freshly created reply port, and arms the timeout at transmission time.
    /// `ready` heartbeats and unrecognized messages are logged and skipped;
    /// the first `authenticate`/`error`/`cancelled` message resolves the
    /// exchange. The timeout rejects with [`ChannelError::Timeout`].
    pub async fn send_and_await(
        &self,
        request: CeremonyRequest,
    ) -> Result<CeremonyOutcome, ChannelError> {
        let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();

        self.frame.wait_until_loaded().await;

        tracing::debug!(
            "Posting authenticate request to frame for transaction {}",
            request.transaction_id
        );
        self.frame
            .post_message(authenticate_envelope(&request), reply_tx);

        // Armed after transmission, not when the call started
        let deadline = Instant::now() + self.timeout;

        loop {
            tokio::select! {
                received = reply_rx.recv() => {
                    let Some(raw) = received else {
                        tracing::error!("Frame dropped its reply port without a terminal message");
                        return Err(ChannelError::Disconnected);
                    };
                    match serde_json::from_value::<FrameMessage>(raw) {
                        Ok(FrameMessage::Ready) => {
                            tracing::debug!("Frame reported ready");
                        }
                        Ok(FrameMessage::Authenticate(assertion)) => {
                            tracing::debug!("Ceremony succeeded, credential: {}", assertion.token);
                            return Ok(CeremonyOutcome::Authenticated(assertion));
                        }
                        Ok(FrameMessage::Error { error }) => {
                            tracing::debug!("Frame reported ceremony failure: {}", error);
                            return Ok(CeremonyOutcome::Faulted(error));
                        }
                        Ok(FrameMessage::Cancelled) => {
                            tracing::debug!("Ceremony cancelled by the user");
                            return Ok(CeremonyOutcome::Cancelled);
                        }
                        Err(e) => {
                            tracing::warn!("Ignoring unrecognized frame message: {}", e);
                        }
                    }
                }
                _ = tokio::time::sleep_until(deadline) => {
                    let timeout_ms = self.timeout.as_millis() as u64;
                    tracing::warn!("No terminal frame message within {} ms", timeout_ms);
                    return Err(ChannelError::Timeout { timeout_ms });
                }
            }
        }
    }
}
