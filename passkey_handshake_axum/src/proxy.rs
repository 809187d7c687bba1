use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use passkey_handshake::{CloseRequest, ClosedTransaction};

use crate::config::UPSTREAM_AUTH_BASE;
use crate::error::ProxyError;

/// Shared state of the proxy routes: upstream base URL plus a pooled client.
#[derive(Clone)]
pub struct ProxyState {
    pub upstream_base: String,
    pub client: reqwest::Client,
}

impl ProxyState {
    pub fn new(upstream_base: String) -> Self {
        Self {
            upstream_base,
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ProxyState {
    fn default() -> Self {
        Self::new(UPSTREAM_AUTH_BASE.clone())
    }
}

fn passthrough(status: reqwest::StatusCode, data: Value) -> Response {
    let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(data)).into_response()
}

pub(crate) async fn create_transaction(
    State(state): State<ProxyState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, ProxyError> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or(ProxyError::MissingUserId)?;

    tracing::debug!("Forwarding create-transaction for user {}", user_id);

    let response = state
        .client
        .post(&state.upstream_base)
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .header("X-User-Id", user_id)
        .body(if body.is_empty() { "{}".to_string() } else { body })
        .send()
        .await
        .map_err(|e| ProxyError::upstream("auth-create", e))?;

    let status = response.status();
    let data: Value = response
        .json()
        .await
        .map_err(|e| ProxyError::upstream("auth-create", e))?;

    tracing::debug!("Create-transaction upstream answered {}", status);
    Ok(passthrough(status, data))
}

pub(crate) async fn validate_transaction(
    State(state): State<ProxyState>,
    Path(transaction_id): Path<String>,
    body: String,
) -> Result<Response, ProxyError> {
    tracing::debug!("Forwarding validation for transaction {}", transaction_id);

    let response = state
        .client
        .post(format!("{}/{}/validation", state.upstream_base, transaction_id))
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .body(body)
        .send()
        .await
        .map_err(|e| ProxyError::upstream("auth-validate", e))?;

    let status = response.status();
    let data: Value = response
        .json()
        .await
        .map_err(|e| ProxyError::upstream("auth-validate", e))?;

    tracing::debug!("Validation for {} upstream answered {}", transaction_id, status);
    Ok(passthrough(status, data))
}

/// Close is best-effort bookkeeping: a missing upstream endpoint or any
/// proxy-level failure answers 200 with a synthesized fallback token. This is
/// a deliberate client-visible contract, not an accidental swallow.
pub(crate) async fn close_transaction(
    State(state): State<ProxyState>,
    Path(transaction_id): Path<String>,
    body: String,
) -> Response {
    let request: CloseRequest = serde_json::from_str(&body).unwrap_or_default();
    let transaction_code = request.transaction_code.as_deref();

    tracing::debug!("Forwarding close for transaction {}", transaction_id);

    let sent = state
        .client
        .post(format!("{}/{}/close", state.upstream_base, transaction_id))
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .body(if body.is_empty() { "{}".to_string() } else { body })
        .send()
        .await;

    let response = match sent {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Close transport failed for {}, degrading: {}", transaction_id, e);
            return fallback_response(transaction_code);
        }
    };

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        tracing::warn!(
            "Close endpoint missing upstream for {}, degrading to fallback token",
            transaction_id
        );
        return fallback_response(transaction_code);
    }

    match response.json::<Value>().await {
        Ok(data) => {
            tracing::debug!("Close for {} upstream answered {}", transaction_id, status);
            passthrough(status, data)
        }
        Err(e) => {
            tracing::warn!("Close response unparseable for {}, degrading: {}", transaction_id, e);
            fallback_response(transaction_code)
        }
    }
}

fn fallback_response(transaction_code: Option<&str>) -> Response {
    (
        StatusCode::OK,
        Json(ClosedTransaction::fallback(transaction_code)),
    )
        .into_response()
}
