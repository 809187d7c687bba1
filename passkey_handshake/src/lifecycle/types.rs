use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of the create-transaction call.
///
/// The upstream service has answered with `id`, `transaction_id` or `txId`
/// depending on environment; all three spellings are accepted. Remaining
/// fields are passed through untouched.
#[derive(Deserialize, Debug, Clone)]
pub struct CreatedTransaction {
    #[serde(alias = "transaction_id", alias = "txId")]
    pub id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Passthrough of the upstream validation response.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub status: u16,
    pub body: Value,
}

/// Body of the close-transaction call.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CloseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_code: Option<String>,
}

/// Result of closing a transaction.
///
/// `fallback` marks a synthesized result produced when the close endpoint was
/// unavailable; the security token is then derived locally rather than issued
/// upstream.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClosedTransaction {
    pub security_token: String,
    pub token: String,
    pub status: String,
    #[serde(default)]
    pub fallback: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ClosedTransaction {
    /// Synthesized close result used when the endpoint cannot be reached.
    pub fn fallback(transaction_code: Option<&str>) -> Self {
        let token = synthesize_fallback_token(transaction_code);
        Self {
            security_token: token.clone(),
            token,
            status: "completed".to_string(),
            fallback: true,
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
        }
    }
}

/// Derives the fallback security token for a degraded close.
///
/// The supplied transaction code is used verbatim when present; otherwise the
/// token is `fallback_{unix_millis}`. One format for every degrade path.
pub fn synthesize_fallback_token(transaction_code: Option<&str>) -> String {
    match transaction_code {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => format!("fallback_{}", chrono::Utc::now().timestamp_millis()),
    }
}
