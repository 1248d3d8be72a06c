//! GpstarBuilder -- fluent builder for constructing [`GpstarBoard`]
//! instances.
//!
//! Separates configuration from construction so that callers can set up
//! the serial port and baud rate before the transport connection is
//! established.
//!
//! # Example
//!
//! ```no_run
//! use trigboard_gpstar::builder::GpstarBuilder;
//! use trigboard_gpstar::models::gpstar_audio;
//!
//! # async fn example() -> trigboard_core::Result<()> {
//! let board = GpstarBuilder::new(gpstar_audio())
//!     .serial_port("/dev/ttyUSB0")
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use trigboard_core::error::{Error, Result};
use trigboard_core::transport::Transport;
use trigboard_core::TriggerBoard;

use crate::board::GpstarBoard;
use crate::models::BoardModel;

/// Fluent builder for [`GpstarBoard`].
///
/// All configuration has defaults derived from the [`BoardModel`], so the
/// simplest usage is:
///
/// ```ignore
/// let board = GpstarBuilder::new(gpstar_audio())
///     .serial_port("/dev/ttyUSB0")
///     .build()
///     .await?;
/// ```
pub struct GpstarBuilder {
    model: BoardModel,
    serial_port: Option<String>,
    baud_rate: Option<u32>,
    flush_on_connect: bool,
}

impl GpstarBuilder {
    /// Create a new builder for the given board model.
    pub fn new(model: BoardModel) -> Self {
        GpstarBuilder {
            model,
            serial_port: None,
            baud_rate: None,
            flush_on_connect: true,
        }
    }

    /// Set the serial port path (e.g. `/dev/ttyUSB0` or `COM3`).
    pub fn serial_port(mut self, port: &str) -> Self {
        self.serial_port = Some(port.to_string());
        self
    }

    /// Override the default baud rate for this model.
    pub fn baud_rate(mut self, baud: u32) -> Self {
        self.baud_rate = Some(baud);
        self
    }

    /// Discard stale RX data when the driver is built (default: true).
    ///
    /// The OS buffers serial input from before the port was opened by
    /// this process; a board left reporting into an unread port can leave
    /// a torn frame at the front of that buffer.
    pub fn flush_on_connect(mut self, enabled: bool) -> Self {
        self.flush_on_connect = enabled;
        self
    }

    /// Build a [`GpstarBoard`] with a caller-provided transport.
    ///
    /// This is the primary entry point for testing (pass a
    /// `MockTransport` from `trigboard-test-harness`) and for advanced
    /// use cases where the caller manages the transport lifecycle
    /// directly.
    pub async fn build_with_transport(self, transport: Box<dyn Transport>) -> Result<GpstarBoard> {
        let mut board = GpstarBoard::new(transport, self.model);
        if self.flush_on_connect {
            board.flush().await?;
        }
        Ok(board)
    }

    /// Build a [`GpstarBoard`] using a serial transport.
    ///
    /// Requires that [`serial_port()`](Self::serial_port) has been
    /// called. The baud rate defaults to the model's default if not
    /// overridden.
    pub async fn build(self) -> Result<GpstarBoard> {
        let port = self
            .serial_port
            .as_ref()
            .ok_or_else(|| Error::InvalidParameter("serial_port is required for build()".into()))?;
        let baud = self.baud_rate.unwrap_or(self.model.default_baud_rate);

        let transport = trigboard_transport::SerialTransport::open(port, baud).await?;
        self.build_with_transport(Box::new(transport)).await
    }
}
