//! Shared helpers for integration tests: a mock upstream authentication
//! service, a scripted ceremony frame and a recording presenter.

pub mod mock_frame;
pub mod recording;
