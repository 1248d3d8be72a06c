//! # trigboard -- Serial Control for Audio Trigger Boards
//!
//! `trigboard` is an asynchronous Rust library for driving serial-attached
//! polyphonic audio trigger boards (GPStar Audio, WAV Trigger). It is
//! designed for prop controllers, escape-room sequencers, and show
//! automation where sound effects must fire on cue over a plain UART.
//!
//! ## Quick Start
//!
//! Add `trigboard` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! trigboard = "0.1"
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! Connect to a board and fire a track:
//!
//! ```no_run
//! use trigboard::TriggerBoard;
//! use trigboard::gpstar::{GpstarBuilder, models::gpstar_audio};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut board = GpstarBuilder::new(gpstar_audio())
//!         .serial_port("/dev/ttyUSB0")
//!         .build()
//!         .await?;
//!
//!     board.hello().await?;
//!     board.track_play_solo(1, false).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                    | Purpose                                         |
//! |--------------------------|-------------------------------------------------|
//! | `trigboard-core`         | Traits ([`TriggerBoard`], [`Transport`]), types, errors |
//! | `trigboard-transport`    | Serial transport implementation                 |
//! | `trigboard-gpstar`       | GPStar Audio / WAV Trigger protocol driver      |
//! | `trigboard-test-harness` | Mock transport for hardware-free tests          |
//! | **`trigboard`**          | This facade crate -- re-exports everything      |
//!
//! ## Polling model
//!
//! The protocol is an unacknowledged command/telemetry stream: commands
//! are fire-and-forget and the board pushes status frames whenever it has
//! something to say. The driver spawns no background task; call
//! [`update()`](TriggerBoard::update) (or any query method, which pumps
//! implicitly) from your control loop to keep the state snapshot current.
//!
//! ## Supported Boards
//!
//! - **GPStar Audio** -- 14-voice board with the hello handshake,
//!   current-track status reports, and board-config commands.
//! - **WAV Trigger** -- the original 14-voice board with per-voice track
//!   reports, version string, and system info.

pub use trigboard_core::*;

/// GPStar Audio / WAV Trigger protocol backend.
///
/// Provides [`GpstarBoard`](gpstar::GpstarBoard) and
/// [`GpstarBuilder`](gpstar::GpstarBuilder) for controlling both
/// supported board families over their shared frame format.
#[cfg(feature = "gpstar")]
pub mod gpstar {
    pub use trigboard_gpstar::*;
}

/// Returns a flat list of all supported board models across all enabled
/// backends.
///
/// This is the primary entry point for applications that need to
/// enumerate supported hardware (e.g. for a picker dropdown).
pub fn supported_boards() -> Vec<BoardDefinition> {
    let mut boards = Vec::new();

    #[cfg(feature = "gpstar")]
    {
        boards.extend(gpstar::models::all_models().iter().map(BoardDefinition::from));
    }

    boards
}
