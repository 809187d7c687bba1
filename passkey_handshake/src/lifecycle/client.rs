use async_trait::async_trait;
use serde_json::{Value, json};
use url::Url;

use super::errors::LifecycleError;
use super::types::{CloseRequest, ClosedTransaction, CreatedTransaction, ValidationReport};

/// The three lifecycle calls bounding one authentication attempt.
///
/// Implementations are stateless request/response mappers; retry decisions
/// belong to the caller.
#[async_trait]
pub trait LifecycleApi: Send + Sync {
    /// Creates an authentication transaction for the payer.
    async fn create(&self, user_id: &str) -> Result<CreatedTransaction, LifecycleError>;

    /// Forwards a WebAuthn assertion for upstream verification.
    async fn validate(
        &self,
        transaction_id: &str,
        assertion: &Value,
    ) -> Result<ValidationReport, LifecycleError>;

    /// Finalizes the transaction and obtains the security token.
    ///
    /// Best-effort bookkeeping: implementations must degrade to a
    /// [`ClosedTransaction::fallback`] result instead of failing, so a user
    /// whose ceremony already succeeded is never blocked here.
    async fn close(
        &self,
        transaction_id: &str,
        transaction_code: Option<&str>,
    ) -> Result<ClosedTransaction, LifecycleError>;
}

/// Lifecycle client over the HTTP proxy boundary.
pub struct HttpLifecycleClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpLifecycleClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Builds a client from a textual base URL.
    pub fn from_base_url(base_url: &str) -> Result<Self, LifecycleError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| LifecycleError::Config(format!("Invalid base URL {base_url}: {e}")))?;
        Ok(Self::new(base_url))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

#[async_trait]
impl LifecycleApi for HttpLifecycleClient {
    async fn create(&self, user_id: &str) -> Result<CreatedTransaction, LifecycleError> {
        let response = self
            .client
            .post(self.endpoint("auth/create"))
            .header("X-User-Id", user_id)
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| LifecycleError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LifecycleError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(LifecycleError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedTransaction = serde_json::from_str(&body)
            .map_err(|e| LifecycleError::Serde(format!("Failed to deserialize create response: {e}")))?;

        tracing::debug!("Created authentication transaction {}", created.id);
        Ok(created)
    }

    async fn validate(
        &self,
        transaction_id: &str,
        assertion: &Value,
    ) -> Result<ValidationReport, LifecycleError> {
        let response = self
            .client
            .post(self.endpoint(&format!("auth/{transaction_id}/validate")))
            .json(assertion)
            .send()
            .await
            .map_err(|e| LifecycleError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LifecycleError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(LifecycleError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("Validation for {} returned {}", transaction_id, status);
        Ok(ValidationReport {
            status: status.as_u16(),
            body: serde_json::from_str(&body).unwrap_or(Value::String(body)),
        })
    }

    async fn close(
        &self,
        transaction_id: &str,
        transaction_code: Option<&str>,
    ) -> Result<ClosedTransaction, LifecycleError> {
        let request = CloseRequest {
            transaction_code: transaction_code.map(str::to_string),
        };

        let sent = self
            .client
            .post(self.endpoint(&format!("auth/{transaction_id}/close")))
            .json(&request)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Close transport failed for {}, degrading: {}", transaction_id, e);
                return Ok(ClosedTransaction::fallback(transaction_code));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                "Close for {} returned {}, degrading to fallback token",
                transaction_id,
                status
            );
            return Ok(ClosedTransaction::fallback(transaction_code));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Close body read failed for {}, degrading: {}", transaction_id, e);
                return Ok(ClosedTransaction::fallback(transaction_code));
            }
        };

        match serde_json::from_str::<ClosedTransaction>(&body) {
            Ok(closed) => {
                tracing::debug!(
                    "Closed transaction {} (fallback: {})",
                    transaction_id,
                    closed.fallback
                );
                Ok(closed)
            }
            Err(e) => {
                tracing::warn!("Close response unparseable for {}, degrading: {}", transaction_id, e);
                Ok(ClosedTransaction::fallback(transaction_code))
            }
        }
    }
}
