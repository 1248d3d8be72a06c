//! GPStar Audio / WAV Trigger serial protocol backend for trigboard.
//!
//! This crate implements the framed serial control protocol spoken by
//! GPStar Audio and the WAV Trigger-compatible boards it descends from.
//! It provides:
//!
//! - **Frame codec** ([`frame`]) -- the outbound frame encoder and the
//!   receive-side byte state machine that reassembles telemetry frames
//!   from a possibly-corrupted stream.
//! - **Command builders** ([`commands`]) -- construct correctly-formatted
//!   command frames for every board operation (track transport, gain,
//!   fades, configuration, status requests).
//! - **Dispatcher and state** ([`dispatch`], [`state`]) -- fold inbound
//!   frames into a last-known device-state snapshot.
//! - **Model definitions** ([`models`]) -- capability data for the
//!   supported boards.
//! - **GpstarBoard** ([`board`]) -- the
//!   [`TriggerBoard`](trigboard_core::TriggerBoard) implementation tying
//!   the protocol engine to a [`Transport`](trigboard_core::Transport).
//! - **GpstarBuilder** ([`builder`]) -- fluent builder for constructing
//!   `GpstarBoard` instances.
//!
//! # Example
//!
//! ```
//! use trigboard_gpstar::commands::cmd_track_gain;
//! use trigboard_gpstar::frame::{FrameReceiver, RSP_TRACK_REPORT_EX};
//!
//! // Build a "track 5 to -10 dB" command
//! let cmd = cmd_track_gain(5, -10);
//! assert_eq!(cmd, vec![0xF0, 0xAA, 0x09, 0x08, 0x05, 0x00, 0xF6, 0xFF, 0x55]);
//!
//! // Reassemble a telemetry frame byte by byte
//! let mut rx = FrameReceiver::new();
//! let frame = [0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x55]
//!     .into_iter()
//!     .find_map(|b| rx.feed(b))
//!     .unwrap();
//! assert_eq!(frame.opcode, RSP_TRACK_REPORT_EX);
//! ```

pub mod board;
pub mod builder;
pub mod commands;
pub mod dispatch;
pub mod frame;
pub mod models;
pub mod state;

pub use board::GpstarBoard;
pub use builder::GpstarBuilder;
