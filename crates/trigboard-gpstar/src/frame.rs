//! Frame encoder and receive-side state machine.
//!
//! GPStar Audio and the WAV Trigger-compatible boards it descends from
//! frame every serial message the same way:
//!
//! ```text
//! 0xF0 0xAA <len> <opcode> [<payload>...] 0x55
//! ```
//!
//! - Start markers: `0xF0 0xAA`
//! - `len`: frame length byte (see below)
//! - `opcode`: command byte (outbound) or response byte (inbound)
//! - `payload`: variable-length fields, multi-byte values little-endian
//! - Terminator: `0x55`
//!
//! # Length conventions
//!
//! Host-built command frames count every emitted byte in `len`, terminator
//! included. Board-built telemetry frames count everything *up to* the
//! terminator: a frame whose length byte is `L` carries `L - 3` body bytes
//! (opcode plus `L - 4` payload bytes) followed by `0x55`. The firmware
//! has shipped with this asymmetry for long enough that it is the
//! protocol; both sides here match observed board behavior.
//!
//! The stream is best-effort with no acknowledgments: any byte that
//! violates the expected sequence silently resets the receiver, which
//! resynchronizes on the next valid start-marker pair.

use bytes::{BufMut, BytesMut};

/// First start marker of every frame.
pub const START_1: u8 = 0xF0;

/// Second start marker.
pub const START_2: u8 = 0xAA;

/// Frame terminator byte.
pub const TERMINATOR: u8 = 0x55;

/// Smallest valid length byte: start markers + length + opcode.
pub const MIN_FRAME_LEN: u8 = 4;

/// Largest frame the boards will emit or accept.
pub const MAX_FRAME_LEN: u8 = 32;

/// Version-string response opcode.
pub const RSP_VERSION_STRING: u8 = 129;

/// System-info response opcode (voice and track counts).
pub const RSP_SYSTEM_INFO: u8 = 130;

/// Bulk voice-status response opcode. Received but not dispatched.
pub const RSP_STATUS: u8 = 131;

/// Per-voice track report opcode (voice-table boards).
pub const RSP_TRACK_REPORT: u8 = 132;

/// Extended track report opcode (current-track boards).
pub const RSP_TRACK_REPORT_EX: u8 = 133;

/// Hello handshake response opcode.
///
/// Hello payload fields (track counts, firmware version words) can
/// legitimately contain the marker byte values, so the receiver disables
/// sentinel rejection for the rest of a frame once this opcode is seen.
pub const RSP_HELLO: u8 = 134;

/// Returns `true` for byte values reserved as frame markers.
fn is_sentinel(byte: u8) -> bool {
    byte == START_1 || byte == START_2 || byte == TERMINATOR
}

/// A complete, validated inbound frame.
///
/// This is the protocol-level representation of one telemetry message
/// from the board, produced by [`FrameReceiver`] and consumed by the
/// dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The frame's length byte as received.
    pub length: u8,
    /// Response opcode.
    pub opcode: u8,
    /// Payload bytes (may be empty).
    pub payload: Vec<u8>,
}

/// Encode one outbound command frame.
///
/// Produces the full wire format including markers and terminator; the
/// length byte counts every emitted byte.
///
/// # Example
///
/// ```
/// use trigboard_gpstar::frame::encode_frame;
///
/// // Stop-all command (opcode 4, no fields)
/// let bytes = encode_frame(4, &[]);
/// assert_eq!(bytes, vec![0xF0, 0xAA, 0x05, 0x04, 0x55]);
/// ```
pub fn encode_frame(opcode: u8, fields: &[u8]) -> Vec<u8> {
    let total = fields.len() + 5;
    let mut buf = BytesMut::with_capacity(total);
    buf.put_u8(START_1);
    buf.put_u8(START_2);
    buf.put_u8(total as u8);
    buf.put_u8(opcode);
    buf.put_slice(fields);
    buf.put_u8(TERMINATOR);
    buf.to_vec()
}

/// Receive-side byte state machine.
///
/// Call [`feed()`](FrameReceiver::feed) once per inbound byte; it returns
/// a completed [`Frame`] when the byte finishes one. Partial-frame state
/// persists across calls, so a frame split over several serial reads (or
/// several driver polls) reassembles exactly as if it had arrived whole.
///
/// All framing violations reset the machine to idle without surfacing an
/// error; the stream carries no data worth recovering and the next valid
/// start-marker pair resynchronizes it.
#[derive(Debug)]
pub struct FrameReceiver {
    /// Bytes accepted in the current frame; 0 = idle.
    consumed: usize,
    /// The frame's length byte; body bytes span `consumed` 3..expected.
    expected: usize,
    /// Opcode byte (first body byte).
    opcode: u8,
    /// Payload collected so far.
    payload: Vec<u8>,
    /// Sentinel rejection suppressed for the rest of this frame.
    hello_passthrough: bool,
}

impl FrameReceiver {
    /// Create an idle receiver.
    pub fn new() -> Self {
        FrameReceiver {
            consumed: 0,
            expected: 0,
            opcode: 0,
            payload: Vec::with_capacity(MAX_FRAME_LEN as usize),
            hello_passthrough: false,
        }
    }

    /// Discard any in-progress frame and return to idle.
    pub fn reset(&mut self) {
        self.consumed = 0;
        self.expected = 0;
        self.opcode = 0;
        self.payload.clear();
        self.hello_passthrough = false;
    }

    /// Whether the receiver is mid-frame.
    pub fn in_frame(&self) -> bool {
        self.consumed != 0
    }

    /// Advance the state machine by one byte.
    ///
    /// Returns `Some(frame)` when `byte` completes a valid frame.
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        match self.consumed {
            // Idle: hunt for the first start marker, discarding noise.
            0 => {
                if byte == START_1 {
                    self.consumed = 1;
                }
                None
            }
            // Expect the second start marker.
            1 => {
                if byte == START_2 {
                    self.consumed = 2;
                } else {
                    self.reset();
                }
                None
            }
            // Length byte: must not be a marker value and must be in range.
            2 => {
                if is_sentinel(byte) || byte < MIN_FRAME_LEN || byte > MAX_FRAME_LEN {
                    self.reset();
                } else {
                    self.expected = byte as usize;
                    self.consumed = 3;
                }
                None
            }
            // Body: opcode first, then payload.
            n if n < self.expected => {
                if is_sentinel(byte) && !self.hello_passthrough {
                    self.reset();
                    return None;
                }
                if n == 3 {
                    self.opcode = byte;
                    self.hello_passthrough = byte == RSP_HELLO;
                } else {
                    self.payload.push(byte);
                }
                self.consumed += 1;
                None
            }
            // Terminator position.
            n if n == self.expected => {
                if byte == TERMINATOR {
                    let frame = Frame {
                        length: self.expected as u8,
                        opcode: self.opcode,
                        payload: std::mem::take(&mut self.payload),
                    };
                    self.reset();
                    Some(frame)
                } else {
                    self.reset();
                    None
                }
            }
            _ => {
                self.reset();
                None
            }
        }
    }
}

impl Default for FrameReceiver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a byte slice, collecting any frames produced.
    fn feed_all(rx: &mut FrameReceiver, bytes: &[u8]) -> Vec<Frame> {
        bytes.iter().filter_map(|&b| rx.feed(b)).collect()
    }

    // ---------------------------------------------------------------
    // Encoding
    // ---------------------------------------------------------------

    #[test]
    fn encode_no_fields() {
        assert_eq!(encode_frame(4, &[]), vec![0xF0, 0xAA, 0x05, 0x04, 0x55]);
    }

    #[test]
    fn encode_with_fields() {
        // Master volume -10 dB: opcode 5, gain as u16 LE
        assert_eq!(
            encode_frame(5, &[0xF6, 0xFF]),
            vec![0xF0, 0xAA, 0x07, 0x05, 0xF6, 0xFF, 0x55]
        );
    }

    #[test]
    fn encode_length_counts_terminator() {
        let bytes = encode_frame(3, &[0x00, 0x01, 0x00]);
        assert_eq!(bytes[2] as usize, bytes.len());
    }

    // ---------------------------------------------------------------
    // Complete frames
    // ---------------------------------------------------------------

    #[test]
    fn receive_track_report_ex() {
        let mut rx = FrameReceiver::new();
        let frames = feed_all(&mut rx, &[0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x55]);
        assert_eq!(
            frames,
            vec![Frame {
                length: 7,
                opcode: RSP_TRACK_REPORT_EX,
                payload: vec![0x02, 0x00, 0x01],
            }]
        );
        assert!(!rx.in_frame());
    }

    #[test]
    fn receive_minimum_length_frame() {
        // len 4: opcode only, empty payload
        let mut rx = FrameReceiver::new();
        let frames = feed_all(&mut rx, &[0xF0, 0xAA, 0x04, 0x83, 0x55]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].opcode, RSP_STATUS);
        assert!(frames[0].payload.is_empty());
    }

    #[test]
    fn receive_back_to_back_frames() {
        let mut rx = FrameReceiver::new();
        let mut stream = vec![0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x55];
        stream.extend_from_slice(&[0xF0, 0xAA, 0x07, 0x85, 0x03, 0x00, 0x00, 0x55]);
        let frames = feed_all(&mut rx, &stream);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].payload, vec![0x02, 0x00, 0x01]);
        assert_eq!(frames[1].payload, vec![0x03, 0x00, 0x00]);
    }

    #[test]
    fn split_feeding_equals_whole_feeding() {
        // The same frame split at every possible boundary yields the
        // same result as feeding it in one call.
        let wire = [0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x55];
        for split in 1..wire.len() {
            let mut rx = FrameReceiver::new();
            let mut frames = feed_all(&mut rx, &wire[..split]);
            assert!(frames.is_empty(), "frame completed early at split {split}");
            frames.extend(feed_all(&mut rx, &wire[split..]));
            assert_eq!(frames.len(), 1, "no frame after split {split}");
            assert_eq!(frames[0].payload, vec![0x02, 0x00, 0x01]);
        }
    }

    // ---------------------------------------------------------------
    // Resynchronization
    // ---------------------------------------------------------------

    #[test]
    fn garbage_before_frame_is_discarded() {
        let mut rx = FrameReceiver::new();
        let mut stream = vec![0x00, 0x13, 0x37, 0x55, 0xAA];
        stream.extend_from_slice(&[0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x55]);
        let frames = feed_all(&mut rx, &stream);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn bad_second_marker_resets_then_resyncs() {
        let mut rx = FrameReceiver::new();
        let mut stream = vec![0xF0, 0x42];
        stream.extend_from_slice(&[0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x55]);
        let frames = feed_all(&mut rx, &stream);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].opcode, RSP_TRACK_REPORT_EX);
    }

    #[test]
    fn length_out_of_range_resets() {
        let mut rx = FrameReceiver::new();
        assert!(feed_all(&mut rx, &[0xF0, 0xAA, 33]).is_empty());
        assert!(!rx.in_frame());

        assert!(feed_all(&mut rx, &[0xF0, 0xAA, 3]).is_empty());
        assert!(!rx.in_frame());
    }

    #[test]
    fn length_at_maximum_is_accepted() {
        let mut rx = FrameReceiver::new();
        let mut stream = vec![0xF0, 0xAA, 32, 0x81];
        stream.extend(std::iter::repeat(0x41).take(28));
        stream.push(0x55);
        let frames = feed_all(&mut rx, &stream);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].payload.len(), 28);
    }

    #[test]
    fn sentinel_as_length_resets() {
        let mut rx = FrameReceiver::new();
        for sentinel in [0xF0, 0xAA, 0x55] {
            assert!(feed_all(&mut rx, &[0xF0, 0xAA, sentinel]).is_empty());
            assert!(!rx.in_frame());
        }
    }

    #[test]
    fn sentinel_in_payload_aborts_frame() {
        let mut rx = FrameReceiver::new();
        for sentinel in [0xF0, 0xAA, 0x55] {
            let frames = feed_all(&mut rx, &[0xF0, 0xAA, 0x07, 0x85, 0x02, sentinel]);
            assert!(frames.is_empty());
            assert!(!rx.in_frame(), "not idle after sentinel 0x{sentinel:02X}");
        }
    }

    #[test]
    fn aborted_frame_then_valid_frame_parses() {
        let mut rx = FrameReceiver::new();
        // Torn frame: payload hits a stray terminator byte.
        let mut stream = vec![0xF0, 0xAA, 0x08, 0x84, 0x01, 0x55];
        stream.extend_from_slice(&[0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x55]);
        let frames = feed_all(&mut rx, &stream);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].opcode, RSP_TRACK_REPORT_EX);
    }

    #[test]
    fn wrong_terminator_drops_frame() {
        let mut rx = FrameReceiver::new();
        let frames = feed_all(&mut rx, &[0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x99]);
        assert!(frames.is_empty());
        assert!(!rx.in_frame());
    }

    // ---------------------------------------------------------------
    // Hello sentinel passthrough
    // ---------------------------------------------------------------

    #[test]
    fn hello_payload_accepts_sentinel_bytes() {
        let mut rx = FrameReceiver::new();
        // Hello with marker-valued payload bytes: 14 voices, 0xAAF0
        // tracks, version word 0x0155.
        let stream = [
            0xF0, 0xAA, 0x09, 0x86, 0x0E, 0xF0, 0xAA, 0x55, 0x01, 0x55,
        ];
        let frames = feed_all(&mut rx, &stream);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].opcode, RSP_HELLO);
        assert_eq!(frames[0].payload, vec![0x0E, 0xF0, 0xAA, 0x55, 0x01]);
    }

    #[test]
    fn non_hello_frame_rejects_same_bytes() {
        let mut rx = FrameReceiver::new();
        // Identical shape with a non-hello opcode aborts at the first
        // sentinel payload byte.
        let stream = [
            0xF0, 0xAA, 0x09, 0x82, 0x0E, 0xF0, 0xAA, 0x55, 0x01, 0x55,
        ];
        let frames = feed_all(&mut rx, &stream);
        assert!(frames.is_empty());
    }

    #[test]
    fn hello_passthrough_clears_between_frames() {
        let mut rx = FrameReceiver::new();
        let hello = [0xF0, 0xAA, 0x09, 0x86, 0x0E, 0xF0, 0xAA, 0x55, 0x01, 0x55];
        assert_eq!(feed_all(&mut rx, &hello).len(), 1);

        // The next non-hello frame must reject sentinels again.
        let torn = [0xF0, 0xAA, 0x07, 0x85, 0xF0];
        assert!(feed_all(&mut rx, &torn).is_empty());
        assert!(!rx.in_frame());
    }

    // ---------------------------------------------------------------
    // Reset
    // ---------------------------------------------------------------

    #[test]
    fn reset_discards_partial_frame() {
        let mut rx = FrameReceiver::new();
        feed_all(&mut rx, &[0xF0, 0xAA, 0x07, 0x85]);
        assert!(rx.in_frame());
        rx.reset();
        assert!(!rx.in_frame());

        // A fresh frame parses normally afterwards.
        let frames = feed_all(&mut rx, &[0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x55]);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn double_start_marker_is_dropped() {
        // F0 F0 resets at the second marker position; the pair that
        // follows the reset is hunted from idle and the frame is lost.
        // This matches the board firmware's receiver.
        let mut rx = FrameReceiver::new();
        let frames = feed_all(&mut rx, &[0xF0, 0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x55]);
        assert!(frames.is_empty());

        // But the receiver is idle again and the next frame parses.
        let frames = feed_all(&mut rx, &[0xF0, 0xAA, 0x07, 0x85, 0x02, 0x00, 0x01, 0x55]);
        assert_eq!(frames.len(), 1);
    }
}
