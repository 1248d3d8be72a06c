//! trigboard-core: Core traits, types, and error definitions for trigboard.
//!
//! This crate defines the board-agnostic abstractions that trigboard
//! backends implement. Host applications (prop controllers, escape-room
//! sequencers, show automation) depend on these types without pulling in
//! any specific board driver.
//!
//! # Key types
//!
//! - [`TriggerBoard`] -- the unified trait for controlling an audio trigger board
//! - [`Transport`] -- byte-level communication channel
//! - [`Error`] / [`Result`] -- error handling

pub mod board;
pub mod error;
pub mod transport;
pub mod types;

// Re-export key types at crate root for ergonomic `use trigboard_core::*`.
pub use board::TriggerBoard;
pub use error::{Error, Result};
pub use transport::Transport;
pub use types::*;
