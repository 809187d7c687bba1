//! Scripted double for the embedded ceremony frame.

use async_trait::async_trait;
use passkey_handshake::{CeremonyFrame, FramePort};
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

/// Frame that answers each posted envelope with a fixed message script.
///
/// Retains its copy of the reply port so tests can prove that late sends land
/// on a closed channel, and records every outbound envelope for inspection.
pub struct ScriptedFrame {
    script: Vec<Value>,
    delay: Duration,
    pub posted: Mutex<Vec<Value>>,
    pub retained_port: Mutex<Option<FramePort>>,
}

impl ScriptedFrame {
    pub fn new(script: Vec<Value>) -> Self {
        Self::with_delay(script, Duration::ZERO)
    }

    /// Script delivered only after `delay`, to hold an attempt in its
    /// ceremony wait.
    pub fn with_delay(script: Vec<Value>, delay: Duration) -> Self {
        Self {
            script,
            delay,
            posted: Mutex::new(Vec::new()),
            retained_port: Mutex::new(None),
        }
    }
}

#[async_trait]
impl CeremonyFrame for ScriptedFrame {
    async fn wait_until_loaded(&self) {}

    fn post_message(&self, envelope: Value, reply_port: FramePort) {
        self.posted.lock().unwrap().push(envelope);
        *self.retained_port.lock().unwrap() = Some(reply_port.clone());
        let script = self.script.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            for message in script {
                let _ = reply_port.send(message);
            }
        });
    }
}
