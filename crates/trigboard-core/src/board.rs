//! The `TriggerBoard` trait -- unified interface for audio trigger board
//! backends.
//!
//! This trait is the primary API surface of trigboard. Prop controllers
//! and show sequencers program against `dyn TriggerBoard` without needing
//! to know which board's protocol dialect is in use.
//!
//! # Polling model
//!
//! The driver is poll-driven: it spawns no background task and never
//! delivers callbacks. Inbound telemetry accumulates in the OS serial
//! buffer until the caller invokes [`update()`](TriggerBoard::update) (or
//! any query method, which pumps implicitly). Absent polling, state is
//! stale but never corrupted. Methods take `&mut self`; a multi-threaded
//! host must serialize driver access externally (a single owning task or
//! a mutex).
//!
//! Command methods are one-shot fire-and-forget: the protocol carries no
//! acknowledgments and no sequence numbers, so a send returns as soon as
//! the bytes are written to the transport.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BoardCapabilities, BoardInfo};

/// Unified asynchronous interface for controlling an audio trigger board.
///
/// Methods that touch the transport are `async`; methods that return
/// cached state ([`info()`](TriggerBoard::info),
/// [`capabilities()`](TriggerBoard::capabilities)) are synchronous.
///
/// Query methods that reflect live device status pump any pending inbound
/// bytes before reading, so their answers are as fresh as the transport
/// allows without blocking.
#[async_trait]
pub trait TriggerBoard: Send {
    /// Return static information about the connected board (vendor, model).
    fn info(&self) -> &BoardInfo;

    /// Return the capabilities of the connected board.
    fn capabilities(&self) -> &BoardCapabilities;

    /// Process all currently-buffered inbound bytes.
    ///
    /// Returns promptly once the transport has no more pending data.
    /// Completed telemetry frames update the driver's device-state
    /// snapshot; garbage bytes are silently discarded.
    async fn update(&mut self) -> Result<()>;

    /// Discard any partially-received frame and all buffered inbound bytes.
    ///
    /// Use after opening the port or after a board reset, when the RX
    /// line may carry stale or torn data.
    async fn flush(&mut self) -> Result<()>;

    // -----------------------------------------------------------------
    // Track transport control
    // -----------------------------------------------------------------

    /// Play a track solo: stop everything else, then play `track`.
    ///
    /// `lock` prevents the track's voice from being stolen when the board
    /// runs out of free voices.
    async fn track_play_solo(&mut self, track: u16, lock: bool) -> Result<()>;

    /// Play a track polyphonically, mixing it with whatever is playing.
    async fn track_play_poly(&mut self, track: u16, lock: bool) -> Result<()>;

    /// Stop a single track.
    async fn track_stop(&mut self, track: u16) -> Result<()>;

    /// Pause a single track. The track holds its voice and position.
    async fn track_pause(&mut self, track: u16) -> Result<()>;

    /// Resume a previously paused track.
    async fn track_resume(&mut self, track: u16) -> Result<()>;

    /// Enable or disable looping for a track.
    async fn track_loop(&mut self, track: u16, enable: bool) -> Result<()>;

    /// Load a track into a voice paused at position zero.
    ///
    /// Combine with [`resume_all_in_sync()`](TriggerBoard::resume_all_in_sync)
    /// to start multiple tracks sample-aligned.
    async fn track_load(&mut self, track: u16, lock: bool) -> Result<()>;

    /// Queue a track to start after `delay_ms`, optionally chaining
    /// `next_track` to start when it finishes.
    ///
    /// Only boards with queue support accept this; others return
    /// [`Error::Unsupported`](crate::error::Error::Unsupported).
    async fn track_play_queued(
        &mut self,
        track: u16,
        lock: bool,
        delay_ms: u16,
        next_track: u16,
    ) -> Result<()> {
        let _ = (track, lock, delay_ms, next_track);
        Err(crate::error::Error::Unsupported(
            "queued playback not supported".into(),
        ))
    }

    // -----------------------------------------------------------------
    // Gain and fades
    // -----------------------------------------------------------------

    /// Set the master output gain in dB (typically -70..=+10).
    ///
    /// Values outside the board's range are truncated to wire width and
    /// clamped by the firmware, not rejected here.
    async fn master_gain(&mut self, gain_db: i16) -> Result<()>;

    /// Set the gain of a single track in dB.
    async fn track_gain(&mut self, track: u16, gain_db: i16) -> Result<()>;

    /// Fade a track to `gain_db` over `time_ms` milliseconds, optionally
    /// stopping the track when the fade completes.
    async fn track_fade(
        &mut self,
        track: u16,
        gain_db: i16,
        time_ms: u16,
        stop_on_complete: bool,
    ) -> Result<()>;

    // -----------------------------------------------------------------
    // Global controls
    // -----------------------------------------------------------------

    /// Stop all tracks immediately.
    async fn stop_all(&mut self) -> Result<()>;

    /// Resume all paused/loaded tracks in sample sync.
    async fn resume_all_in_sync(&mut self) -> Result<()>;

    /// Clear the board's pending playback queue.
    async fn queue_clear(&mut self) -> Result<()> {
        Err(crate::error::Error::Unsupported(
            "playback queue not supported".into(),
        ))
    }

    /// Enable or disable queued-playback handling on the board.
    async fn queue_control(&mut self, enable: bool) -> Result<()> {
        let _ = enable;
        Err(crate::error::Error::Unsupported(
            "playback queue not supported".into(),
        ))
    }

    // -----------------------------------------------------------------
    // Board configuration
    // -----------------------------------------------------------------

    /// Switch the on-board amplifier on or off.
    async fn amp_power(&mut self, on: bool) -> Result<()> {
        let _ = on;
        Err(crate::error::Error::Unsupported(
            "amplifier control not supported".into(),
        ))
    }

    /// Enable or disable unsolicited track reporting.
    ///
    /// With reporting on, the board pushes a report frame whenever a
    /// track starts or stops; the driver folds these into its state on
    /// the next [`update()`](TriggerBoard::update).
    async fn set_reporting(&mut self, enable: bool) -> Result<()> {
        let _ = enable;
        Err(crate::error::Error::Unsupported(
            "track reporting not supported".into(),
        ))
    }

    /// Turn the board's status LED on or off.
    async fn set_status_led(&mut self, on: bool) -> Result<()> {
        let _ = on;
        Err(crate::error::Error::Unsupported(
            "status LED control not supported".into(),
        ))
    }

    /// Enable or disable short-track-overload protection.
    async fn set_short_overload(&mut self, enable: bool) -> Result<()> {
        let _ = enable;
        Err(crate::error::Error::Unsupported(
            "short-overload control not supported".into(),
        ))
    }

    /// Enable or disable track-force (voice stealing for new triggers).
    async fn set_track_force(&mut self, enable: bool) -> Result<()> {
        let _ = enable;
        Err(crate::error::Error::Unsupported(
            "track-force control not supported".into(),
        ))
    }

    /// Select the active trigger bank.
    async fn set_trigger_bank(&mut self, bank: u8) -> Result<()> {
        let _ = bank;
        Err(crate::error::Error::Unsupported(
            "trigger banks not supported".into(),
        ))
    }

    /// Offset the playback samplerate (pitch bend). Signed, board-defined
    /// scale; zero restores nominal pitch.
    async fn samplerate_offset(&mut self, offset: i16) -> Result<()> {
        let _ = offset;
        Err(crate::error::Error::Unsupported(
            "samplerate offset not supported".into(),
        ))
    }

    // -----------------------------------------------------------------
    // Status, handshake, and queries
    // -----------------------------------------------------------------

    /// Ask the board to report the playback status of `track`.
    ///
    /// The answer arrives as a telemetry frame; read it afterwards with
    /// [`is_track_playing()`](TriggerBoard::is_track_playing).
    async fn request_track_status(&mut self, track: u16) -> Result<()>;

    /// Whether `track` is currently playing, per the latest telemetry.
    async fn is_track_playing(&mut self, track: u16) -> Result<bool>;

    /// Whether the track-status latch has been reset.
    ///
    /// The latch is cleared by every incoming track report and set only
    /// by [`reset_track_counter()`](TriggerBoard::reset_track_counter);
    /// callers use the pair to detect report arrivals between polls.
    async fn is_track_counter_reset(&mut self) -> Result<bool>;

    /// Arm the track-status latch.
    fn reset_track_counter(&mut self);

    /// Request the board's firmware version string.
    async fn request_version(&mut self) -> Result<()> {
        Err(crate::error::Error::Unsupported(
            "version string not supported".into(),
        ))
    }

    /// The firmware version string, if a version response has arrived.
    async fn version(&mut self) -> Result<Option<String>> {
        Err(crate::error::Error::Unsupported(
            "version string not supported".into(),
        ))
    }

    /// Request voice/track counts via the system-info command.
    async fn request_sys_info(&mut self) -> Result<()> {
        Err(crate::error::Error::Unsupported(
            "system info not supported".into(),
        ))
    }

    /// Whether a system-info response has been received.
    async fn sys_info_received(&mut self) -> Result<bool> {
        Err(crate::error::Error::Unsupported(
            "system info not supported".into(),
        ))
    }

    /// Send the hello handshake request.
    async fn hello(&mut self) -> Result<()> {
        Err(crate::error::Error::Unsupported(
            "hello handshake not supported".into(),
        ))
    }

    /// Whether a hello response has been received.
    async fn hello_received(&mut self) -> Result<bool> {
        Err(crate::error::Error::Unsupported(
            "hello handshake not supported".into(),
        ))
    }

    /// The firmware version word from the extended hello response, if
    /// one has arrived.
    async fn version_number(&mut self) -> Result<Option<u16>> {
        Err(crate::error::Error::Unsupported(
            "hello handshake not supported".into(),
        ))
    }

    /// Number of tracks on the board's storage, per the latest
    /// hello/system-info response (0 until one arrives).
    async fn num_tracks(&mut self) -> Result<u16>;

    /// Number of polyphonic voices, per the latest hello/system-info
    /// response (0 until one arrives).
    async fn num_voices(&mut self) -> Result<u8>;
}
