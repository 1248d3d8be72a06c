//! trigboard-test-harness: Mock transports for trigboard.
//!
//! This crate provides [`MockTransport`] for deterministic unit testing of
//! the protocol engine and driver without requiring real board hardware.

pub mod mock_serial;

pub use mock_serial::MockTransport;
