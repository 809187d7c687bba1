use thiserror::Error;

/// Errors that can occur while exchanging messages with the embedded frame.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// No terminal message arrived before the timeout elapsed
    #[error("Ceremony timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The frame dropped its end of the port without sending a terminal message
    #[error("Frame closed its port before answering")]
    Disconnected,
}
