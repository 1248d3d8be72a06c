//! Core types used throughout trigboard.
//!
//! These types provide a board-agnostic abstraction layer over the serial
//! control protocols spoken by polyphonic audio trigger boards.

use std::fmt;

/// Board vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// GPStar Technologies (GPStar Audio).
    GpstarTechnologies,
    /// Robertsonics (WAV Trigger and compatible boards).
    Robertsonics,
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Vendor::GpstarTechnologies => "GPStar Technologies",
            Vendor::Robertsonics => "Robertsonics",
        };
        write!(f, "{s}")
    }
}

/// Static information about a connected board.
#[derive(Debug, Clone)]
pub struct BoardInfo {
    /// Board vendor.
    pub vendor: Vendor,
    /// Human-readable model name (e.g. "GPStar Audio").
    pub model_name: String,
    /// Machine-readable model identifier (e.g. "gpstar-audio").
    pub model_id: String,
}

/// Capability description for a board model.
///
/// Audio trigger boards share one frame format but differ in which
/// telemetry they report and which configuration commands their firmware
/// accepts. The driver consults these flags to decide how to interpret
/// playback reports and which commands to refuse with
/// [`Error::Unsupported`](crate::error::Error::Unsupported).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCapabilities {
    /// The board reports per-voice occupancy (track-report frames) rather
    /// than a single current-track status.
    pub voice_table: bool,
    /// Number of polyphonic playback voices.
    pub num_voices: u8,
    /// Supports the hello handshake (capability discovery).
    pub hello: bool,
    /// Reports its firmware version as a string on request.
    pub version_string: bool,
    /// Reports voice/track counts via the system-info request.
    pub sys_info: bool,
    /// Supports polling a single track's playback status.
    pub track_status: bool,
    /// Has a controllable status LED.
    pub status_led: bool,
    /// Supports the short-track-overload protection toggle.
    pub short_overload: bool,
    /// Supports the track-force (steal-a-voice) toggle.
    pub track_force: bool,
    /// Supports queued playback (start-delay / follow-on track) and the
    /// queue-clear and queue-control commands.
    pub queue: bool,
    /// Has a switchable on-board amplifier.
    pub amp_power: bool,
    /// Supports the playback samplerate offset (pitch bend) command.
    pub samplerate_offset: bool,
    /// Supports track reporting on/off.
    pub reporting: bool,
    /// Supports trigger bank selection.
    pub trigger_bank: bool,
}

/// A supported board model, as advertised by
/// [`supported_boards()`](https://docs.rs/trigboard).
///
/// Produced from the backend model definitions; used by applications that
/// need to enumerate supported hardware (e.g. for a picker dropdown).
#[derive(Debug, Clone)]
pub struct BoardDefinition {
    /// Board vendor.
    pub vendor: Vendor,
    /// Human-readable model name.
    pub model_name: &'static str,
    /// Default serial baud rate for this model.
    pub default_baud_rate: u32,
    /// Full capability description for this model.
    pub capabilities: BoardCapabilities,
}
