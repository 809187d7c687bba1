use std::{env, sync::LazyLock};

pub(super) static CEREMONY_TIMEOUT_MS: LazyLock<u64> = LazyLock::new(|| {
    env::var("CEREMONY_TIMEOUT_MS")
        .map(|v| match v.parse::<u64>() {
            Ok(ms) => ms,
            Err(_) => {
                tracing::warn!("Invalid CEREMONY_TIMEOUT_MS: {}. Using default 60000", v);
                60_000
            }
        })
        .unwrap_or(60_000)
});
