//! Serial port transport for board communication.
//!
//! This module provides [`SerialTransport`], which implements the
//! [`Transport`] trait for USB serial adapters and hardware UARTs.
//!
//! The boards speak 8N1 with no flow control -- the only framing their
//! UARTs support -- so configuration is just the port path and baud rate.
//! Both supported models default to 57600 baud.

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPort, SerialPortBuilderExt, SerialStream};

use trigboard_core::error::{Error, Result};
use trigboard_core::transport::Transport;

/// Default baud rate of the supported boards.
pub const DEFAULT_BAUD_RATE: u32 = 57_600;

/// Serial port transport for board communication.
///
/// # Example
///
/// ```no_run
/// use trigboard_transport::SerialTransport;
/// use trigboard_core::transport::Transport;
/// use std::time::Duration;
///
/// # async fn example() -> trigboard_core::Result<()> {
/// let mut transport = SerialTransport::open("/dev/ttyUSB0", 57_600).await?;
///
/// // Send a stop-all command
/// transport.send(&[0xF0, 0xAA, 0x05, 0x04, 0x55]).await?;
///
/// // Drain whatever telemetry is already buffered
/// let mut buf = [0u8; 64];
/// let n = transport.receive(&mut buf, Duration::ZERO).await;
/// # Ok(())
/// # }
/// ```
pub struct SerialTransport {
    /// The underlying serial port stream.
    port: Option<SerialStream>,
    /// Port name for logging.
    port_name: String,
}

impl SerialTransport {
    /// Open a serial port at the given baud rate (8 data bits, 1 stop
    /// bit, no parity, no flow control).
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port path (e.g. "/dev/ttyUSB0" on Linux, "COM3"
    ///   on Windows)
    /// * `baud_rate` - Baud rate; the boards ship at 57600
    pub async fn open(port: &str, baud_rate: u32) -> Result<Self> {
        tracing::debug!(port = %port, baud_rate, "opening serial port");

        let mut stream = tokio_serial::new(port, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .stop_bits(tokio_serial::StopBits::One)
            .parity(tokio_serial::Parity::None)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| {
                tracing::error!(port = %port, error = %e, "failed to open serial port");
                Error::Transport(format!("failed to open serial port {port}: {e}"))
            })?;

        // De-assert DTR and RTS after opening. Some USB adapters assert
        // DTR by default, and boards that route it to the reset line
        // would reboot on every connect.
        if let Err(e) = stream.write_data_terminal_ready(false) {
            tracing::warn!(port = %port, error = %e, "failed to de-assert DTR");
        }
        if let Err(e) = stream.write_request_to_send(false) {
            tracing::warn!(port = %port, error = %e, "failed to de-assert RTS");
        }

        tracing::info!(port = %port, baud_rate, "serial port opened");

        Ok(Self {
            port: Some(stream),
            port_name: port.to_string(),
        })
    }

    /// Get the name of the serial port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(port = %self.port_name, data = ?data, "sending data");

        port.write_all(data).await.map_err(io_to_error)?;

        // Flush so the command leaves the adapter immediately; the boards
        // react in real time and callers sequence sends against audio.
        port.flush().await.map_err(io_to_error)?;

        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        match tokio::time::timeout(timeout, port.read(buf)).await {
            Ok(Ok(n)) => {
                tracing::trace!(port = %self.port_name, data = ?&buf[..n], "received data");
                Ok(n)
            }
            Ok(Err(e)) => {
                tracing::error!(port = %self.port_name, error = %e, "failed to receive data");
                Err(io_to_error(e))
            }
            Err(_) => Err(Error::Timeout),
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            tracing::debug!(port = %self.port_name, "closing serial port");
            if let Err(e) = port.flush().await {
                tracing::warn!(port = %self.port_name, error = %e, "flush before close failed");
            }
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }
}

/// Map an I/O error to the library error type, folding disconnection
/// kinds into [`Error::ConnectionLost`].
fn io_to_error(e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::BrokenPipe || e.kind() == std::io::ErrorKind::NotConnected {
        Error::ConnectionLost
    } else {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_mapping() {
        let e = io_to_error(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"));
        assert!(matches!(e, Error::ConnectionLost));

        let e = io_to_error(std::io::Error::new(std::io::ErrorKind::TimedOut, "slow"));
        assert!(matches!(e, Error::Io(_)));
    }

    #[tokio::test]
    async fn open_missing_port_fails() {
        let result = SerialTransport::open("/dev/does-not-exist-trigboard", 57_600).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
