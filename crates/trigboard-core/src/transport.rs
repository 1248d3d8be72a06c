//! Transport trait for board communication.
//!
//! The [`Transport`] trait abstracts over the physical link to an audio
//! trigger board. Implementations exist for serial ports (USB virtual COM
//! or a logic-level UART adapter) and for mock transports used in tests.
//!
//! Protocol engines (the frame codec in `trigboard-gpstar`) operate on a
//! `Transport` rather than directly on a serial port, enabling both real
//! hardware control and deterministic unit testing with `MockTransport`
//! from the `trigboard-test-harness` crate.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport to a board.
///
/// Implementations handle buffering and error recovery at the physical
/// layer. Protocol-level concerns (frame markers, opcodes) are handled by
/// the protocol engine that consumes this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes to the board.
    ///
    /// Implementations should block until all bytes have been written to
    /// the underlying transport (serial TX buffer).
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive bytes from the board into the provided buffer.
    ///
    /// Returns the number of bytes actually read. Waits up to `timeout`
    /// for data to arrive; returns [`Error::Timeout`](crate::error::Error::Timeout)
    /// if no data is received within the deadline.
    ///
    /// A zero `timeout` returns only bytes the OS has already buffered.
    /// The poll-driven driver relies on this to drain pending input
    /// without ever blocking the caller.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the transport connection.
    ///
    /// After calling `close()`, subsequent `send()` and `receive()` calls
    /// should return [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
