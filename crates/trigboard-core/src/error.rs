//! Error types for trigboard.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Transport-layer and application-layer
//! errors are both captured here. Framing errors on the receive path are
//! deliberately *not* represented: the wire protocol is a best-effort
//! telemetry stream and the frame receiver silently resynchronizes on
//! garbage input instead of reporting it.

/// The error type for all trigboard operations.
///
/// Variants cover the failure modes encountered when communicating with a
/// serial audio trigger board: physical transport failures, timeouts, and
/// operations the connected board model does not support.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (serial port open/configure failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// A protocol-level error (unexpected data from a mock or future
    /// request/response surface).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Timed out waiting for data from the board.
    ///
    /// This typically indicates the board is powered off, the baud rate
    /// is wrong, or the TX/RX lines are swapped.
    #[error("timeout waiting for data")]
    Timeout,

    /// The requested operation is not supported by this board model.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// An invalid parameter was passed to a driver method.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No connection to the board has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection to the board was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
