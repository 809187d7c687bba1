use async_trait::async_trait;
use serde_json::Value;

use super::types::FramePort;

/// Handle to the embedded frame hosting the WebAuthn ceremony.
///
/// The frame sits across a security boundary; the host only ever loads it,
/// posts an envelope into it together with a transferred reply port, and
/// listens on the retained end of that port. Implementations adapt whatever
/// the actual embedding is (a browser iframe, a webview, a test double).
#[async_trait]
pub trait CeremonyFrame: Send + Sync {
    /// Completes once the frame's document has finished loading.
    ///
    /// Resolves immediately when the frame is already loaded.
    async fn wait_until_loaded(&self);

    /// Posts the envelope to the frame, transferring the reply port with it.
    ///
    /// Fire-and-forget: responses, if any, arrive on the retained end of
    /// `reply_port`.
    fn post_message(&self, envelope: Value, reply_port: FramePort);
}
