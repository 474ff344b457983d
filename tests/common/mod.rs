//! Shared helpers for integration tests.

pub mod fixtures;
pub mod stub_transport;
