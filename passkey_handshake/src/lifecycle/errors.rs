use thiserror::Error;

/// Errors that can occur during transaction lifecycle calls.
///
/// The `close` step never surfaces these to its caller; it degrades to a
/// synthesized fallback result instead.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Transport-level failure reaching the proxy
    #[error("Network error: {0}")]
    Network(String),

    /// The remote service answered with a non-success status
    #[error("Upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The response body could not be decoded
    #[error("Serde error: {0}")]
    Serde(String),

    /// Invalid endpoint configuration (e.g. malformed base URL)
    #[error("Configuration error: {0}")]
    Config(String),
}
