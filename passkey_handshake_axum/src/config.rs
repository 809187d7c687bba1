//! Central configuration for the proxy routes

use std::sync::LazyLock;

/// Base URL of the remote authentication-transaction service.
/// Default: the sandbox environment.
pub static UPSTREAM_AUTH_BASE: LazyLock<String> = LazyLock::new(|| {
    std::env::var("UPSTREAM_AUTH_BASE").unwrap_or_else(|_| {
        "https://login-sandbox.melioffice.com/internal/authentication_transactions".to_string()
    })
});
