use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::mpsc;

/// Sending half of a reply port, transferred to the embedded frame.
///
/// Envelopes travel as raw JSON values, exactly as they would over a
/// `postMessage` transport; the host decodes them once at the channel
/// boundary.
pub type FramePort = mpsc::UnboundedSender<Value>;

/// Payload of the outbound `authenticate` request posted to the frame.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CeremonyRequest {
    pub user_id: String,
    pub transaction_id: String,
    /// Milliseconds since the Unix epoch, stamped at transmission
    pub timestamp: i64,
}

impl CeremonyRequest {
    pub fn new(user_id: &str, transaction_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            transaction_id: transaction_id.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Builds the wire envelope `{message: "authenticate", data: {...}}` for the
/// outbound request.
pub fn authenticate_envelope(request: &CeremonyRequest) -> Value {
    json!({ "message": "authenticate", "data": request })
}

/// Inbound messages from the frame, tagged by their `message` field.
///
/// Anything that fails to decode into one of these variants is an
/// unrecognized message: the channel logs it and keeps waiting.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "message", content = "data", rename_all = "lowercase")]
pub enum FrameMessage {
    /// Informational heartbeat: the frame has loaded. Not a terminal outcome.
    Ready,
    /// The ceremony succeeded and produced credential material
    Authenticate(CeremonyAssertion),
    /// The ceremony failed inside the frame
    Error { error: CeremonyFault },
    /// The user aborted the ceremony
    Cancelled,
}

/// Credential material reported by the frame after a successful ceremony.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CeremonyAssertion {
    /// The credential id produced by the authenticator
    pub token: String,
    #[serde(default)]
    pub transaction_code: Option<String>,
    /// Security token obtained by the frame from the authentication service
    #[serde(default)]
    pub security_token: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub validation_type: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Failure details reported by the frame.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CeremonyFault {
    pub message: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the frame considers the failure worth retrying; honored verbatim
    #[serde(default)]
    pub retriable: Option<bool>,
    #[serde(default)]
    pub cause: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl std::fmt::Display for CeremonyFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{} (cause: {})", self.message, cause),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Terminal result of one ceremony exchange.
#[derive(Debug, Clone)]
pub enum CeremonyOutcome {
    Authenticated(CeremonyAssertion),
    Faulted(CeremonyFault),
    Cancelled,
}
