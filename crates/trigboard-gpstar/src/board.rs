//! GpstarBoard -- the [`TriggerBoard`] trait implementation.
//!
//! This module ties the frame codec ([`frame`](crate::frame),
//! [`commands`](crate::commands)) to a [`Transport`] to produce a working
//! board driver. The driver is poll-driven: it owns the transport
//! directly, spawns no task, and processes inbound telemetry only when
//! the caller invokes [`update()`](TriggerBoard::update) or a query
//! method.
//!
//! Commands are fire-and-forget -- the protocol has no acknowledgments,
//! so a command method returns as soon as its bytes are written. Queries
//! pump pending input through the receiver and dispatcher first, then
//! read the state snapshot.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};

use trigboard_core::error::{Error, Result};
use trigboard_core::transport::Transport;
use trigboard_core::types::{BoardCapabilities, BoardInfo};
use trigboard_core::TriggerBoard;

use crate::commands;
use crate::dispatch::MessageDispatcher;
use crate::frame::FrameReceiver;
use crate::models::BoardModel;
use crate::state::DeviceState;

/// Transport read chunk size. Larger than any frame, so one read can
/// drain several queued reports.
const READ_CHUNK: usize = 64;

/// A connected audio trigger board.
///
/// Constructed via [`GpstarBuilder`](crate::builder::GpstarBuilder). All
/// board communication goes through the [`Transport`] provided at build
/// time.
pub struct GpstarBoard {
    transport: Box<dyn Transport>,
    receiver: FrameReceiver,
    dispatcher: MessageDispatcher,
    state: DeviceState,
    model: BoardModel,
    info: BoardInfo,
}

impl GpstarBoard {
    /// Create a new driver from its constituent parts.
    ///
    /// This is called by [`GpstarBuilder`](crate::builder::GpstarBuilder);
    /// callers should use the builder API instead.
    pub(crate) fn new(transport: Box<dyn Transport>, model: BoardModel) -> Self {
        let info = BoardInfo {
            vendor: model.vendor,
            model_name: model.name.to_string(),
            model_id: model.model_id.to_string(),
        };
        let dispatcher = MessageDispatcher::new(model.capabilities.voice_table);
        GpstarBoard {
            transport,
            receiver: FrameReceiver::new(),
            dispatcher,
            state: DeviceState::new(),
            model,
            info,
        }
    }

    /// Drain all currently-buffered inbound bytes through the receiver
    /// and dispatcher.
    ///
    /// Zero-timeout reads return only what the transport already holds,
    /// so this never blocks the caller; it returns once the transport
    /// reports no pending data.
    async fn pump(&mut self) -> Result<()> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            let n = match self.transport.receive(&mut buf, Duration::ZERO).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(Error::Timeout) => break,
                Err(e) => return Err(e),
            };
            trace!(bytes = n, "pumping inbound data");
            for &byte in &buf[..n] {
                if let Some(frame) = self.receiver.feed(byte) {
                    trace!(opcode = frame.opcode, len = frame.length, "frame received");
                    self.dispatcher.dispatch(&frame, &mut self.state);
                }
            }
        }
        Ok(())
    }

    /// Write one command frame to the transport.
    async fn send(&mut self, bytes: &[u8]) -> Result<()> {
        debug!(opcode = bytes[3], len = bytes.len(), "sending command");
        self.transport.send(bytes).await
    }

    /// Capability gate: refuse commands the connected model does not speak.
    fn require(&self, supported: bool, what: &str) -> Result<()> {
        if supported {
            Ok(())
        } else {
            Err(Error::Unsupported(format!("{what} ({})", self.model.name)))
        }
    }

    fn caps(&self) -> &BoardCapabilities {
        &self.model.capabilities
    }

    /// Play or load a track, using the extended control frame only when a
    /// voice lock is requested.
    async fn track_start(&mut self, track: u16, code: u8, lock: bool) -> Result<()> {
        let cmd = if lock {
            commands::cmd_track_control_ex(track, code, true)
        } else {
            commands::cmd_track_control(track, code)
        };
        self.send(&cmd).await
    }
}

#[async_trait]
impl TriggerBoard for GpstarBoard {
    fn info(&self) -> &BoardInfo {
        &self.info
    }

    fn capabilities(&self) -> &BoardCapabilities {
        &self.model.capabilities
    }

    async fn update(&mut self) -> Result<()> {
        self.pump().await
    }

    async fn flush(&mut self) -> Result<()> {
        self.receiver.reset();
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match self.transport.receive(&mut buf, Duration::ZERO).await {
                Ok(0) | Err(Error::Timeout) => break,
                Ok(n) => trace!(bytes = n, "flushed stale input"),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Track transport control
    // -----------------------------------------------------------------

    async fn track_play_solo(&mut self, track: u16, lock: bool) -> Result<()> {
        self.track_start(track, commands::TRK_PLAY_SOLO, lock).await
    }

    async fn track_play_poly(&mut self, track: u16, lock: bool) -> Result<()> {
        self.track_start(track, commands::TRK_PLAY_POLY, lock).await
    }

    async fn track_stop(&mut self, track: u16) -> Result<()> {
        let cmd = commands::cmd_track_control(track, commands::TRK_STOP);
        self.send(&cmd).await
    }

    async fn track_pause(&mut self, track: u16) -> Result<()> {
        let cmd = commands::cmd_track_control(track, commands::TRK_PAUSE);
        self.send(&cmd).await
    }

    async fn track_resume(&mut self, track: u16) -> Result<()> {
        let cmd = commands::cmd_track_control(track, commands::TRK_RESUME);
        self.send(&cmd).await
    }

    async fn track_loop(&mut self, track: u16, enable: bool) -> Result<()> {
        let code = if enable {
            commands::TRK_LOOP_ON
        } else {
            commands::TRK_LOOP_OFF
        };
        let cmd = commands::cmd_track_control(track, code);
        self.send(&cmd).await
    }

    async fn track_load(&mut self, track: u16, lock: bool) -> Result<()> {
        self.track_start(track, commands::TRK_LOAD, lock).await
    }

    async fn track_play_queued(
        &mut self,
        track: u16,
        lock: bool,
        delay_ms: u16,
        next_track: u16,
    ) -> Result<()> {
        self.require(self.caps().queue, "queued playback")?;
        let cmd = commands::cmd_track_control_queued(
            track,
            commands::TRK_PLAY_POLY,
            lock,
            delay_ms,
            next_track,
        );
        self.send(&cmd).await
    }

    // -----------------------------------------------------------------
    // Gain and fades
    // -----------------------------------------------------------------

    async fn master_gain(&mut self, gain_db: i16) -> Result<()> {
        let cmd = commands::cmd_master_gain(gain_db);
        self.send(&cmd).await
    }

    async fn track_gain(&mut self, track: u16, gain_db: i16) -> Result<()> {
        let cmd = commands::cmd_track_gain(track, gain_db);
        self.send(&cmd).await
    }

    async fn track_fade(
        &mut self,
        track: u16,
        gain_db: i16,
        time_ms: u16,
        stop_on_complete: bool,
    ) -> Result<()> {
        let cmd = commands::cmd_track_fade(track, gain_db, time_ms, stop_on_complete);
        self.send(&cmd).await
    }

    // -----------------------------------------------------------------
    // Global controls
    // -----------------------------------------------------------------

    async fn stop_all(&mut self) -> Result<()> {
        let cmd = commands::cmd_stop_all();
        self.send(&cmd).await
    }

    async fn resume_all_in_sync(&mut self) -> Result<()> {
        let cmd = commands::cmd_resume_all_in_sync();
        self.send(&cmd).await
    }

    async fn queue_clear(&mut self) -> Result<()> {
        self.require(self.caps().queue, "playback queue")?;
        let cmd = commands::cmd_queue_clear();
        self.send(&cmd).await
    }

    async fn queue_control(&mut self, enable: bool) -> Result<()> {
        self.require(self.caps().queue, "playback queue")?;
        let cmd = commands::cmd_queue_control(enable);
        self.send(&cmd).await
    }

    // -----------------------------------------------------------------
    // Board configuration
    // -----------------------------------------------------------------

    async fn amp_power(&mut self, on: bool) -> Result<()> {
        self.require(self.caps().amp_power, "amplifier control")?;
        let cmd = commands::cmd_amp_power(on);
        self.send(&cmd).await
    }

    async fn set_reporting(&mut self, enable: bool) -> Result<()> {
        self.require(self.caps().reporting, "track reporting")?;
        let cmd = commands::cmd_set_reporting(enable);
        self.send(&cmd).await
    }

    async fn set_status_led(&mut self, on: bool) -> Result<()> {
        self.require(self.caps().status_led, "status LED control")?;
        let cmd = commands::cmd_status_led(on);
        self.send(&cmd).await
    }

    async fn set_short_overload(&mut self, enable: bool) -> Result<()> {
        self.require(self.caps().short_overload, "short-overload control")?;
        let cmd = commands::cmd_short_overload(enable);
        self.send(&cmd).await
    }

    async fn set_track_force(&mut self, enable: bool) -> Result<()> {
        self.require(self.caps().track_force, "track-force control")?;
        let cmd = commands::cmd_track_force(enable);
        self.send(&cmd).await
    }

    async fn set_trigger_bank(&mut self, bank: u8) -> Result<()> {
        self.require(self.caps().trigger_bank, "trigger banks")?;
        let cmd = commands::cmd_set_trigger_bank(bank);
        self.send(&cmd).await
    }

    async fn samplerate_offset(&mut self, offset: i16) -> Result<()> {
        self.require(self.caps().samplerate_offset, "samplerate offset")?;
        let cmd = commands::cmd_samplerate_offset(offset);
        self.send(&cmd).await
    }

    // -----------------------------------------------------------------
    // Status, handshake, and queries
    // -----------------------------------------------------------------

    async fn request_track_status(&mut self, track: u16) -> Result<()> {
        self.require(self.caps().track_status, "track status polling")?;
        let cmd = commands::cmd_get_track_status(track);
        self.send(&cmd).await
    }

    async fn is_track_playing(&mut self, track: u16) -> Result<bool> {
        self.pump().await?;
        if self.caps().voice_table {
            Ok(self.state.voice_playing(track))
        } else {
            Ok(self.state.current_track_playing(track))
        }
    }

    async fn is_track_counter_reset(&mut self) -> Result<bool> {
        self.pump().await?;
        Ok(self.state.track_counter_armed())
    }

    fn reset_track_counter(&mut self) {
        self.state.arm_track_counter();
    }

    async fn request_version(&mut self) -> Result<()> {
        self.require(self.caps().version_string, "version string")?;
        let cmd = commands::cmd_get_version();
        self.send(&cmd).await
    }

    async fn version(&mut self) -> Result<Option<String>> {
        self.require(self.caps().version_string, "version string")?;
        self.pump().await?;
        Ok(self.state.version().map(str::to_owned))
    }

    async fn request_sys_info(&mut self) -> Result<()> {
        self.require(self.caps().sys_info, "system info")?;
        let cmd = commands::cmd_get_sys_info();
        self.send(&cmd).await
    }

    async fn sys_info_received(&mut self) -> Result<bool> {
        self.require(self.caps().sys_info, "system info")?;
        self.pump().await?;
        Ok(self.state.sys_info_received())
    }

    async fn hello(&mut self) -> Result<()> {
        self.require(self.caps().hello, "hello handshake")?;
        let cmd = commands::cmd_hello();
        self.send(&cmd).await
    }

    async fn hello_received(&mut self) -> Result<bool> {
        self.require(self.caps().hello, "hello handshake")?;
        self.pump().await?;
        Ok(self.state.hello_received())
    }

    async fn version_number(&mut self) -> Result<Option<u16>> {
        self.require(self.caps().hello, "hello handshake")?;
        self.pump().await?;
        Ok(self.state.version_number())
    }

    async fn num_tracks(&mut self) -> Result<u16> {
        self.pump().await?;
        Ok(self.state.num_tracks())
    }

    async fn num_voices(&mut self) -> Result<u8> {
        self.pump().await?;
        Ok(self.state.num_voices())
    }
}
