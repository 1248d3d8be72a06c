//! Frame dispatcher: applies inbound telemetry to [`DeviceState`].
//!
//! The dispatcher is the only code that mutates device state. It is keyed
//! on the frame opcode and selects between two report-handler sets with a
//! capability flag: current-track boards report playback through extended
//! track reports (opcode 133), voice-table boards through per-voice track
//! reports (opcode 132). The version/system-info/hello handlers are shared.
//!
//! Dispatch is deterministic and idempotent per frame: replaying the same
//! frame produces the same state. Frames whose payload is too short for
//! their handler, and frames with unhandled opcodes, are dropped without
//! touching state.

use tracing::debug;

use crate::frame::{
    Frame, RSP_HELLO, RSP_SYSTEM_INFO, RSP_TRACK_REPORT, RSP_TRACK_REPORT_EX, RSP_VERSION_STRING,
};
use crate::state::{DeviceState, MAX_VOICES, VERSION_LEN};

/// Opcode-keyed frame interpreter.
#[derive(Debug)]
pub struct MessageDispatcher {
    /// Selects the voice-table report handler over the current-track one.
    voice_table: bool,
}

impl MessageDispatcher {
    /// Create a dispatcher for a board variant.
    pub fn new(voice_table: bool) -> Self {
        MessageDispatcher { voice_table }
    }

    /// Apply one complete frame to the state snapshot.
    pub fn dispatch(&self, frame: &Frame, state: &mut DeviceState) {
        match frame.opcode {
            RSP_TRACK_REPORT_EX if !self.voice_table => {
                if frame.payload.len() < 3 {
                    debug!(len = frame.payload.len(), "short track report, dropped");
                    return;
                }
                let track = u16::from_le_bytes([frame.payload[0], frame.payload[1]]);
                state.current_track = Some(track);
                state.track_playing = frame.payload[2] != 0;
                state.track_counter = false;
            }
            RSP_TRACK_REPORT if self.voice_table => {
                if frame.payload.len() < 4 {
                    debug!(len = frame.payload.len(), "short track report, dropped");
                    return;
                }
                // The board reports 0-based track indices; the public id
                // space is 1-based.
                let track =
                    u16::from_le_bytes([frame.payload[0], frame.payload[1]]).wrapping_add(1);
                let voice = frame.payload[2] as usize;
                let stopped = frame.payload[3] == 0;
                if voice >= MAX_VOICES {
                    debug!(voice, "track report for voice out of range, dropped");
                    return;
                }
                if stopped {
                    if state.voice_table[voice] == Some(track) {
                        state.voice_table[voice] = None;
                    }
                } else {
                    state.voice_table[voice] = Some(track);
                }
            }
            RSP_VERSION_STRING => {
                let text = &frame.payload[..frame.payload.len().min(VERSION_LEN)];
                let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
                state.version = Some(String::from_utf8_lossy(&text[..end]).into_owned());
                state.version_received = true;
            }
            RSP_SYSTEM_INFO => {
                if frame.payload.len() < 3 {
                    debug!(len = frame.payload.len(), "short system info, dropped");
                    return;
                }
                state.num_voices = frame.payload[0];
                state.num_tracks = u16::from_le_bytes([frame.payload[1], frame.payload[2]]);
                state.sys_info_received = true;
            }
            RSP_HELLO => {
                if frame.payload.len() < 3 {
                    debug!(len = frame.payload.len(), "short hello, dropped");
                    return;
                }
                state.num_voices = frame.payload[0];
                state.num_tracks = u16::from_le_bytes([frame.payload[1], frame.payload[2]]);
                if frame.payload.len() >= 5 {
                    state.version_number =
                        Some(u16::from_le_bytes([frame.payload[3], frame.payload[4]]));
                }
                state.hello_received = true;
            }
            opcode => {
                debug!(opcode, "ignoring frame with unhandled opcode");
            }
        }
    }
}
