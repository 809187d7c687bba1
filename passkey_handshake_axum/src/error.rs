use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures a proxy route can answer with directly.
///
/// The close route never produces these; its failures degrade to a fallback
/// body instead.
#[derive(Debug, Error)]
pub(crate) enum ProxyError {
    #[error("X-User-Id header is required")]
    MissingUserId,

    #[error("Upstream request failed in {function}: {message}")]
    Upstream {
        function: &'static str,
        message: String,
    },
}

impl ProxyError {
    pub(crate) fn upstream(function: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Upstream {
            function,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingUserId => {
                tracing::warn!("Rejected proxy call without X-User-Id header");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "X-User-Id header is required"})),
                )
                    .into_response()
            }
            Self::Upstream { function, message } => {
                tracing::error!("Proxy failure in {}: {}", function, message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": message,
                        "timestamp": chrono::Utc::now().to_rfc3339(),
                        "function": function,
                    })),
                )
                    .into_response()
            }
        }
    }
}
