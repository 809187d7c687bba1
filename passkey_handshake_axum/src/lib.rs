//! Axum proxy boundary for the passkey checkout handshake.
//!
//! Browsers never talk to the remote authentication service directly; these
//! routes forward the three lifecycle calls (create, validate, close) across
//! the trusted boundary, answer CORS preflight, and implement the
//! close-fallback contract: a missing close endpoint or a proxy-level failure
//! yields a synthesized security token instead of an error.

mod config;
mod error;
mod proxy;
mod router;

pub use config::UPSTREAM_AUTH_BASE;
pub use proxy::ProxyState;
pub use router::{auth_proxy_router, auth_proxy_router_no_trace, auth_proxy_router_with_state};
