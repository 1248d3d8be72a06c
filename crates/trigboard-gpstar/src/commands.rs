//! Command builders for the GPStar Audio / WAV Trigger serial protocol.
//!
//! This module provides functions to construct command frames for all
//! board operations: track transport control, gain and fades, global
//! controls, board configuration, and status/handshake requests.
//!
//! All functions are pure -- they produce byte vectors without performing
//! any I/O. The caller is responsible for sending the bytes over a
//! transport.
//!
//! Numeric arguments are emitted at wire width with no validation: the
//! boards clamp or ignore out-of-range values themselves, and a gain of
//! -10 dB travels as the two's-complement word `0xFFF6`. Boolean flags
//! travel as a single byte, nonzero = true.

use crate::frame::encode_frame;

// ---------------------------------------------------------------
// Command opcodes
// ---------------------------------------------------------------

/// Request the firmware version string (response opcode 129).
const CMD_GET_VERSION: u8 = 1;

/// Request voice/track counts (response opcode 130).
const CMD_GET_SYS_INFO: u8 = 2;

/// Track transport control. Fields: control code + track id.
const CMD_TRACK_CONTROL: u8 = 3;

/// Stop all tracks. No fields.
const CMD_STOP_ALL: u8 = 4;

/// Master output gain. Field: gain as i16.
const CMD_MASTER_VOLUME: u8 = 5;

// Opcodes 6 and 7 are unassigned in the board firmware.

/// Per-track gain. Fields: track id + gain as i16.
const CMD_TRACK_VOLUME: u8 = 8;

/// On-board amplifier power. Field: enable flag.
const CMD_AMP_POWER: u8 = 9;

/// Track fade. Fields: track id, target gain, fade time, stop flag.
const CMD_TRACK_FADE: u8 = 10;

/// Resume all paused/loaded tracks in sample sync. No fields.
const CMD_RESUME_ALL_SYNC: u8 = 11;

/// Playback samplerate offset (pitch bend). Field: offset as i16.
const CMD_SAMPLERATE_OFFSET: u8 = 12;

/// Extended track control. Fields: code, track id, lock flag.
const CMD_TRACK_CONTROL_EX: u8 = 13;

/// Unsolicited track reporting on/off. Field: enable flag.
const CMD_SET_REPORTING: u8 = 14;

/// Trigger bank selection. Field: bank number.
const CMD_SET_TRIGGER_BANK: u8 = 15;

/// Request a single track's playback status (response opcode 133).
const CMD_GET_TRACK_STATUS: u8 = 16;

/// Hello handshake request (response opcode 134).
const CMD_GET_HELLO: u8 = 17;

/// Status LED on.
const CMD_LED_ON: u8 = 18;

/// Status LED off.
const CMD_LED_OFF: u8 = 19;

/// Short-track-overload protection on.
const CMD_SHORT_OVERLOAD_ON: u8 = 20;

/// Short-track-overload protection off.
const CMD_SHORT_OVERLOAD_OFF: u8 = 21;

/// Track-force (voice stealing) on.
const CMD_TRACK_FORCE_ON: u8 = 22;

/// Track-force off.
const CMD_TRACK_FORCE_OFF: u8 = 23;

/// Clear the pending playback queue. No fields.
const CMD_QUEUE_CLEAR: u8 = 24;

/// Queued-playback handling on/off. Field: enable flag.
const CMD_QUEUE_CONTROL: u8 = 25;

/// Queued track control. Fields: code, track id, lock flag, start
/// delay, follow-on track id.
const CMD_TRACK_CONTROL_QUEUED: u8 = 26;

// ---------------------------------------------------------------
// Track transport control codes
// ---------------------------------------------------------------

/// Stop everything else, then play this track.
pub const TRK_PLAY_SOLO: u8 = 0;

/// Play this track mixed with current playback.
pub const TRK_PLAY_POLY: u8 = 1;

/// Pause this track in place.
pub const TRK_PAUSE: u8 = 2;

/// Resume this track from where it was paused.
pub const TRK_RESUME: u8 = 3;

/// Stop this track.
pub const TRK_STOP: u8 = 4;

/// Loop this track.
pub const TRK_LOOP_ON: u8 = 5;

/// Stop looping this track (finishes the current pass).
pub const TRK_LOOP_OFF: u8 = 6;

/// Load this track paused at position zero.
pub const TRK_LOAD: u8 = 7;

/// Nominal usable gain range of the boards, in dB.
///
/// Values outside this range are transmitted as-is; the firmware clamps.
pub const GAIN_MIN_DB: i16 = -70;
pub const GAIN_MAX_DB: i16 = 10;

// ---------------------------------------------------------------
// Command builders
// ---------------------------------------------------------------

/// Build a version-string request.
pub fn cmd_get_version() -> Vec<u8> {
    encode_frame(CMD_GET_VERSION, &[])
}

/// Build a system-info request.
pub fn cmd_get_sys_info() -> Vec<u8> {
    encode_frame(CMD_GET_SYS_INFO, &[])
}

/// Build a basic track-control command.
///
/// `code` is one of the `TRK_*` constants.
pub fn cmd_track_control(track: u16, code: u8) -> Vec<u8> {
    let trk = track.to_le_bytes();
    encode_frame(CMD_TRACK_CONTROL, &[code, trk[0], trk[1]])
}

/// Build an extended track-control command carrying a voice-lock flag.
pub fn cmd_track_control_ex(track: u16, code: u8, lock: bool) -> Vec<u8> {
    let trk = track.to_le_bytes();
    encode_frame(CMD_TRACK_CONTROL_EX, &[code, trk[0], trk[1], lock as u8])
}

/// Build a queued track-control command.
///
/// The board starts `track` after `delay_ms` and, when it finishes,
/// starts `next_track` (0 = no follow-on).
pub fn cmd_track_control_queued(
    track: u16,
    code: u8,
    lock: bool,
    delay_ms: u16,
    next_track: u16,
) -> Vec<u8> {
    let trk = track.to_le_bytes();
    let delay = delay_ms.to_le_bytes();
    let next = next_track.to_le_bytes();
    encode_frame(
        CMD_TRACK_CONTROL_QUEUED,
        &[
            code, trk[0], trk[1], lock as u8, delay[0], delay[1], next[0], next[1],
        ],
    )
}

/// Build a stop-all command.
pub fn cmd_stop_all() -> Vec<u8> {
    encode_frame(CMD_STOP_ALL, &[])
}

/// Build a master-gain command. `gain_db` travels as two's-complement.
pub fn cmd_master_gain(gain_db: i16) -> Vec<u8> {
    let gain = (gain_db as u16).to_le_bytes();
    encode_frame(CMD_MASTER_VOLUME, &[gain[0], gain[1]])
}

/// Build a per-track gain command.
pub fn cmd_track_gain(track: u16, gain_db: i16) -> Vec<u8> {
    let trk = track.to_le_bytes();
    let gain = (gain_db as u16).to_le_bytes();
    encode_frame(CMD_TRACK_VOLUME, &[trk[0], trk[1], gain[0], gain[1]])
}

/// Build a track-fade command.
pub fn cmd_track_fade(track: u16, gain_db: i16, time_ms: u16, stop_on_complete: bool) -> Vec<u8> {
    let trk = track.to_le_bytes();
    let gain = (gain_db as u16).to_le_bytes();
    let time = time_ms.to_le_bytes();
    encode_frame(
        CMD_TRACK_FADE,
        &[
            trk[0],
            trk[1],
            gain[0],
            gain[1],
            time[0],
            time[1],
            stop_on_complete as u8,
        ],
    )
}

/// Build an amplifier-power command.
pub fn cmd_amp_power(on: bool) -> Vec<u8> {
    encode_frame(CMD_AMP_POWER, &[on as u8])
}

/// Build a resume-all-in-sync command.
pub fn cmd_resume_all_in_sync() -> Vec<u8> {
    encode_frame(CMD_RESUME_ALL_SYNC, &[])
}

/// Build a samplerate-offset command.
pub fn cmd_samplerate_offset(offset: i16) -> Vec<u8> {
    let off = (offset as u16).to_le_bytes();
    encode_frame(CMD_SAMPLERATE_OFFSET, &[off[0], off[1]])
}

/// Build a reporting on/off command.
pub fn cmd_set_reporting(enable: bool) -> Vec<u8> {
    encode_frame(CMD_SET_REPORTING, &[enable as u8])
}

/// Build a trigger-bank selection command.
pub fn cmd_set_trigger_bank(bank: u8) -> Vec<u8> {
    encode_frame(CMD_SET_TRIGGER_BANK, &[bank])
}

/// Build a track-status request.
pub fn cmd_get_track_status(track: u16) -> Vec<u8> {
    let trk = track.to_le_bytes();
    encode_frame(CMD_GET_TRACK_STATUS, &[trk[0], trk[1]])
}

/// Build a hello handshake request.
pub fn cmd_hello() -> Vec<u8> {
    encode_frame(CMD_GET_HELLO, &[])
}

/// Build a status-LED on/off command.
pub fn cmd_status_led(on: bool) -> Vec<u8> {
    if on {
        encode_frame(CMD_LED_ON, &[])
    } else {
        encode_frame(CMD_LED_OFF, &[])
    }
}

/// Build a short-overload on/off command.
pub fn cmd_short_overload(enable: bool) -> Vec<u8> {
    if enable {
        encode_frame(CMD_SHORT_OVERLOAD_ON, &[])
    } else {
        encode_frame(CMD_SHORT_OVERLOAD_OFF, &[])
    }
}

/// Build a track-force on/off command.
pub fn cmd_track_force(enable: bool) -> Vec<u8> {
    if enable {
        encode_frame(CMD_TRACK_FORCE_ON, &[])
    } else {
        encode_frame(CMD_TRACK_FORCE_OFF, &[])
    }
}

/// Build a queue-clear command.
pub fn cmd_queue_clear() -> Vec<u8> {
    encode_frame(CMD_QUEUE_CLEAR, &[])
}

/// Build a queue-control on/off command.
pub fn cmd_queue_control(enable: bool) -> Vec<u8> {
    encode_frame(CMD_QUEUE_CONTROL, &[enable as u8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_gain_wire_bytes() {
        // Track 5 to -10 dB: gain travels as 0xFFF6.
        assert_eq!(
            cmd_track_gain(5, -10),
            vec![0xF0, 0xAA, 0x09, 0x08, 0x05, 0x00, 0xF6, 0xFF, 0x55]
        );
    }

    #[test]
    fn master_gain_wire_bytes() {
        assert_eq!(
            cmd_master_gain(-70),
            vec![0xF0, 0xAA, 0x07, 0x05, 0xBA, 0xFF, 0x55]
        );
        assert_eq!(
            cmd_master_gain(10),
            vec![0xF0, 0xAA, 0x07, 0x05, 0x0A, 0x00, 0x55]
        );
    }

    #[test]
    fn track_control_wire_bytes() {
        // Play track 259 solo: code 0, track 0x0103 LE.
        assert_eq!(
            cmd_track_control(259, TRK_PLAY_SOLO),
            vec![0xF0, 0xAA, 0x08, 0x03, 0x00, 0x03, 0x01, 0x55]
        );
    }

    #[test]
    fn track_control_ex_wire_bytes() {
        assert_eq!(
            cmd_track_control_ex(7, TRK_PLAY_POLY, true),
            vec![0xF0, 0xAA, 0x09, 0x0D, 0x01, 0x07, 0x00, 0x01, 0x55]
        );
    }

    #[test]
    fn track_control_queued_wire_bytes() {
        assert_eq!(
            cmd_track_control_queued(2, TRK_PLAY_POLY, false, 1500, 3),
            vec![
                0xF0, 0xAA, 0x0D, 0x1A, 0x01, 0x02, 0x00, 0x00, 0xDC, 0x05, 0x03, 0x00, 0x55
            ]
        );
    }

    #[test]
    fn track_fade_wire_bytes() {
        // Fade track 1 to -40 dB over 2000 ms, then stop.
        assert_eq!(
            cmd_track_fade(1, -40, 2000, true),
            vec![
                0xF0, 0xAA, 0x0C, 0x0A, 0x01, 0x00, 0xD8, 0xFF, 0xD0, 0x07, 0x01, 0x55
            ]
        );
    }

    #[test]
    fn fixed_frame_commands() {
        assert_eq!(cmd_stop_all(), vec![0xF0, 0xAA, 0x05, 0x04, 0x55]);
        assert_eq!(cmd_resume_all_in_sync(), vec![0xF0, 0xAA, 0x05, 0x0B, 0x55]);
        assert_eq!(cmd_get_version(), vec![0xF0, 0xAA, 0x05, 0x01, 0x55]);
        assert_eq!(cmd_get_sys_info(), vec![0xF0, 0xAA, 0x05, 0x02, 0x55]);
        assert_eq!(cmd_hello(), vec![0xF0, 0xAA, 0x05, 0x11, 0x55]);
        assert_eq!(cmd_queue_clear(), vec![0xF0, 0xAA, 0x05, 0x18, 0x55]);
    }

    #[test]
    fn on_off_pairs_select_opcode() {
        assert_eq!(cmd_status_led(true)[3], 18);
        assert_eq!(cmd_status_led(false)[3], 19);
        assert_eq!(cmd_short_overload(true)[3], 20);
        assert_eq!(cmd_short_overload(false)[3], 21);
        assert_eq!(cmd_track_force(true)[3], 22);
        assert_eq!(cmd_track_force(false)[3], 23);
    }

    #[test]
    fn flag_byte_commands() {
        assert_eq!(cmd_amp_power(true), vec![0xF0, 0xAA, 0x06, 0x09, 0x01, 0x55]);
        assert_eq!(cmd_set_reporting(false), vec![0xF0, 0xAA, 0x06, 0x0E, 0x00, 0x55]);
        assert_eq!(cmd_queue_control(true), vec![0xF0, 0xAA, 0x06, 0x19, 0x01, 0x55]);
    }

    #[test]
    fn get_track_status_wire_bytes() {
        assert_eq!(
            cmd_get_track_status(513),
            vec![0xF0, 0xAA, 0x07, 0x10, 0x01, 0x02, 0x55]
        );
    }

    #[test]
    fn samplerate_offset_negative() {
        assert_eq!(
            cmd_samplerate_offset(-32768),
            vec![0xF0, 0xAA, 0x07, 0x0C, 0x00, 0x80, 0x55]
        );
    }

    #[test]
    fn set_trigger_bank_wire_bytes() {
        assert_eq!(
            cmd_set_trigger_bank(2),
            vec![0xF0, 0xAA, 0x06, 0x0F, 0x02, 0x55]
        );
    }

    #[test]
    fn header_length_matches_emitted_size() {
        // Every builder's length byte equals its full emitted byte count.
        let frames = [
            cmd_get_version(),
            cmd_get_sys_info(),
            cmd_track_control(1, TRK_STOP),
            cmd_track_control_ex(1, TRK_PLAY_SOLO, false),
            cmd_track_control_queued(1, TRK_PLAY_POLY, true, 100, 2),
            cmd_stop_all(),
            cmd_master_gain(0),
            cmd_track_gain(1, 0),
            cmd_track_fade(1, -10, 500, false),
            cmd_amp_power(true),
            cmd_resume_all_in_sync(),
            cmd_samplerate_offset(0),
            cmd_set_reporting(true),
            cmd_set_trigger_bank(1),
            cmd_get_track_status(1),
            cmd_hello(),
            cmd_status_led(true),
            cmd_short_overload(false),
            cmd_track_force(true),
            cmd_queue_clear(),
            cmd_queue_control(false),
        ];
        for frame in &frames {
            assert_eq!(frame[2] as usize, frame.len(), "frame {frame:02X?}");
            assert_eq!(frame[0], 0xF0);
            assert_eq!(frame[1], 0xAA);
            assert_eq!(*frame.last().unwrap(), 0x55);
        }
    }
}
