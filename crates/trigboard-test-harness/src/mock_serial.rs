//! Mock transport for deterministic testing of the protocol engine.
//!
//! [`MockTransport`] implements the [`Transport`] trait against in-memory
//! queues. It supports both traffic patterns the boards produce:
//!
//! - **Unsolicited telemetry**: queue inbound bytes with
//!   [`push_rx()`](MockTransport::push_rx); the driver picks them up on
//!   its next poll. Each queued chunk is returned by one `receive()`
//!   call, so tests can split a frame across polls deliberately.
//! - **Request/response**: pre-load pairs with
//!   [`expect()`](MockTransport::expect); when the matching request is
//!   sent, the response is queued as inbound data.
//!
//! The mock is a cheap clone sharing one inner state, so tests keep a
//! handle for queuing input and inspecting sent bytes after the driver
//! has taken ownership of its clone.
//!
//! # Example
//!
//! ```
//! use trigboard_test_harness::MockTransport;
//!
//! let mock = MockTransport::new();
//! let handle = mock.clone();
//! // hand `mock` to a driver, then:
//! handle.push_rx(&[0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x55]);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use trigboard_core::error::{Error, Result};
use trigboard_core::transport::Transport;

/// A pre-loaded request/response pair.
#[derive(Debug, Clone)]
struct Expectation {
    /// The exact bytes we expect to be sent.
    request: Vec<u8>,
    /// The bytes to queue as inbound data when the request matches.
    response: Vec<u8>,
}

#[derive(Debug)]
struct Inner {
    /// Ordered queue of expected request/response pairs.
    expectations: VecDeque<Expectation>,
    /// Inbound chunks awaiting a `receive()` call.
    rx_queue: VecDeque<Vec<u8>>,
    /// Whether the transport is "connected".
    connected: bool,
    /// Log of all bytes sent through this transport.
    sent_log: Vec<Vec<u8>>,
}

/// A mock [`Transport`] for testing without hardware.
///
/// Cloning yields another handle to the same state. Sends with no pending
/// expectation are accepted silently -- the board protocol is
/// fire-and-forget and most commands have no response. When expectations
/// *are* queued, each send must match the next one exactly.
#[derive(Debug, Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    /// Create a new mock transport in the connected state.
    pub fn new() -> Self {
        MockTransport {
            inner: Arc::new(Mutex::new(Inner {
                expectations: VecDeque::new(),
                rx_queue: VecDeque::new(),
                connected: true,
                sent_log: Vec::new(),
            })),
        }
    }

    /// Queue unsolicited inbound bytes.
    ///
    /// Each call queues one chunk; one `receive()` call returns one
    /// chunk (or as much of it as fits the caller's buffer).
    pub fn push_rx(&self, bytes: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        inner.rx_queue.push_back(bytes.to_vec());
    }

    /// Add an expected request/response pair.
    ///
    /// When `send()` is called with data matching `request`, `response`
    /// is queued as inbound data for subsequent `receive()` calls.
    pub fn expect(&self, request: &[u8], response: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        inner.expectations.push_back(Expectation {
            request: request.to_vec(),
            response: response.to_vec(),
        });
    }

    /// Return a copy of all data sent through this transport.
    ///
    /// Each element is the byte vector from one `send()` call.
    pub fn sent_data(&self) -> Vec<Vec<u8>> {
        self.inner.lock().unwrap().sent_log.clone()
    }

    /// Return the number of expectations not yet consumed.
    pub fn remaining_expectations(&self) -> usize {
        self.inner.lock().unwrap().expectations.len()
    }

    /// Set the connected state.
    ///
    /// When `false`, subsequent `send()` and `receive()` calls return
    /// [`Error::NotConnected`].
    pub fn set_connected(&self, connected: bool) {
        self.inner.lock().unwrap().connected = connected;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.connected {
            return Err(Error::NotConnected);
        }

        inner.sent_log.push(data.to_vec());

        if let Some(expectation) = inner.expectations.pop_front() {
            if data != expectation.request.as_slice() {
                return Err(Error::Protocol(format!(
                    "unexpected send data: expected {:02X?}, got {:02X?}",
                    expectation.request, data
                )));
            }
            inner.rx_queue.push_back(expectation.response);
        }
        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.connected {
            return Err(Error::NotConnected);
        }

        let Some(mut chunk) = inner.rx_queue.pop_front() else {
            return Err(Error::Timeout);
        };

        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            // Caller's buffer was smaller than the chunk; keep the rest.
            chunk.drain(..n);
            inner.rx_queue.push_front(chunk);
        }
        Ok(n)
    }

    async fn close(&mut self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.connected = false;
        inner.rx_queue.clear();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.inner.lock().unwrap().connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn push_rx_then_receive() {
        let handle = MockTransport::new();
        let mut mock = handle.clone();
        handle.push_rx(&[0xF0, 0xAA, 0x05, 0x04, 0x55]);

        let mut buf = [0u8; 64];
        let n = mock.receive(&mut buf, Duration::ZERO).await.unwrap();
        assert_eq!(&buf[..n], &[0xF0, 0xAA, 0x05, 0x04, 0x55]);
    }

    #[tokio::test]
    async fn chunks_arrive_one_per_receive() {
        let handle = MockTransport::new();
        let mut mock = handle.clone();
        handle.push_rx(&[0xF0, 0xAA]);
        handle.push_rx(&[0x05]);

        let mut buf = [0u8; 64];
        assert_eq!(mock.receive(&mut buf, Duration::ZERO).await.unwrap(), 2);
        assert_eq!(mock.receive(&mut buf, Duration::ZERO).await.unwrap(), 1);
        assert!(matches!(
            mock.receive(&mut buf, Duration::ZERO).await,
            Err(Error::Timeout)
        ));
    }

    #[tokio::test]
    async fn small_buffer_preserves_remainder() {
        let handle = MockTransport::new();
        let mut mock = handle.clone();
        handle.push_rx(&[0x01, 0x02, 0x03, 0x04]);

        let mut buf = [0u8; 2];
        let n = mock.receive(&mut buf, Duration::ZERO).await.unwrap();
        assert_eq!(&buf[..n], &[0x01, 0x02]);
        let n = mock.receive(&mut buf, Duration::ZERO).await.unwrap();
        assert_eq!(&buf[..n], &[0x03, 0x04]);
    }

    #[tokio::test]
    async fn receive_without_data_times_out() {
        let mut mock = MockTransport::new();
        let mut buf = [0u8; 8];
        assert!(matches!(
            mock.receive(&mut buf, Duration::ZERO).await,
            Err(Error::Timeout)
        ));
    }

    #[tokio::test]
    async fn expectation_queues_response() {
        let handle = MockTransport::new();
        let mut mock = handle.clone();
        handle.expect(&[0xF0, 0xAA, 0x05, 0x11, 0x55], &[0xAB, 0xCD]);

        mock.send(&[0xF0, 0xAA, 0x05, 0x11, 0x55]).await.unwrap();
        assert_eq!(handle.remaining_expectations(), 0);

        let mut buf = [0u8; 8];
        let n = mock.receive(&mut buf, Duration::ZERO).await.unwrap();
        assert_eq!(&buf[..n], &[0xAB, 0xCD]);
    }

    #[tokio::test]
    async fn mismatched_expectation_errors() {
        let handle = MockTransport::new();
        let mut mock = handle.clone();
        handle.expect(&[0x01], &[0xFF]);

        let result = mock.send(&[0x99]).await;
        assert!(matches!(result, Err(Error::Protocol(_))));
    }

    #[tokio::test]
    async fn sends_without_expectations_are_logged() {
        let handle = MockTransport::new();
        let mut mock = handle.clone();

        mock.send(&[0x01, 0x02]).await.unwrap();
        mock.send(&[0x03]).await.unwrap();

        assert_eq!(handle.sent_data(), vec![vec![0x01, 0x02], vec![0x03]]);
    }

    #[tokio::test]
    async fn disconnect_blocks_io() {
        let handle = MockTransport::new();
        let mut mock = handle.clone();
        assert!(mock.is_connected());

        mock.close().await.unwrap();
        assert!(!mock.is_connected());
        assert!(matches!(mock.send(&[0x01]).await, Err(Error::NotConnected)));

        let mut buf = [0u8; 8];
        assert!(matches!(
            mock.receive(&mut buf, Duration::ZERO).await,
            Err(Error::NotConnected)
        ));
    }

    #[tokio::test]
    async fn set_connected_toggles_state() {
        let handle = MockTransport::new();
        let mut mock = handle.clone();
        handle.set_connected(false);
        assert!(matches!(mock.send(&[0x01]).await, Err(Error::NotConnected)));

        handle.set_connected(true);
        mock.send(&[0x01]).await.unwrap();
    }
}
