//! trigboard-transport: Transport implementations for trigboard.
//!
//! Audio trigger boards connect over a logic-level UART, usually through
//! a USB serial adapter. This crate provides [`SerialTransport`], the
//! [`Transport`](trigboard_core::Transport) implementation the drivers
//! use against real hardware.

pub mod serial;

pub use serial::SerialTransport;
