//! Last-known device state, as assembled from inbound telemetry.
//!
//! [`DeviceState`] is a plain snapshot: it is created at unknown defaults,
//! mutated exclusively by the dispatcher as frames arrive, and read through
//! the driver's query surface. Nothing here touches the transport.

/// Number of polyphonic voices tracked in the voice table.
pub const MAX_VOICES: usize = 14;

/// Maximum firmware version string length in characters.
pub const VERSION_LEN: usize = 20;

/// Snapshot of the last-known board status.
///
/// Fields default to "unknown" (`None`, zero, `false`) until the
/// corresponding telemetry arrives. The handshake flags
/// (`version_received`, `sys_info_received`, `hello_received`) latch on
/// and are never cleared by inbound traffic.
#[derive(Debug, Clone)]
pub struct DeviceState {
    /// Track id from the most recent extended track report.
    pub(crate) current_track: Option<u16>,
    /// Playing flag from the most recent extended track report.
    pub(crate) track_playing: bool,
    /// Report-arrival latch: cleared by every extended track report, set
    /// only by [`arm_track_counter()`](DeviceState::arm_track_counter).
    pub(crate) track_counter: bool,
    /// Which track occupies each voice (voice-table boards only).
    pub(crate) voice_table: [Option<u16>; MAX_VOICES],
    /// Firmware version string, once reported.
    pub(crate) version: Option<String>,
    /// Firmware version word from the extended hello response.
    pub(crate) version_number: Option<u16>,
    /// Number of tracks on the board's storage.
    pub(crate) num_tracks: u16,
    /// Number of polyphonic voices.
    pub(crate) num_voices: u8,
    /// A version-string response has arrived.
    pub(crate) version_received: bool,
    /// A system-info response has arrived.
    pub(crate) sys_info_received: bool,
    /// A hello response has arrived.
    pub(crate) hello_received: bool,
}

impl DeviceState {
    /// Create a snapshot with every field unknown.
    pub fn new() -> Self {
        DeviceState {
            current_track: None,
            track_playing: false,
            track_counter: false,
            voice_table: [None; MAX_VOICES],
            version: None,
            version_number: None,
            num_tracks: 0,
            num_voices: 0,
            version_received: false,
            sys_info_received: false,
            hello_received: false,
        }
    }

    /// Whether `track` occupies any voice (voice-table boards).
    pub fn voice_playing(&self, track: u16) -> bool {
        self.voice_table.iter().any(|slot| *slot == Some(track))
    }

    /// Whether `track` is the current track and playing (current-track
    /// boards).
    pub fn current_track_playing(&self, track: u16) -> bool {
        self.current_track == Some(track) && self.track_playing
    }

    /// Set the report-arrival latch. The next extended track report
    /// clears it again.
    pub fn arm_track_counter(&mut self) {
        self.track_counter = true;
    }

    /// Read the report-arrival latch.
    pub fn track_counter_armed(&self) -> bool {
        self.track_counter
    }

    /// Firmware version string, if reported.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Firmware version word from the extended hello response.
    pub fn version_number(&self) -> Option<u16> {
        self.version_number
    }

    /// Reported track count (0 until hello/system-info arrives).
    pub fn num_tracks(&self) -> u16 {
        self.num_tracks
    }

    /// Reported voice count (0 until hello/system-info arrives).
    pub fn num_voices(&self) -> u8 {
        self.num_voices
    }

    /// Whether a version-string response has arrived.
    pub fn version_received(&self) -> bool {
        self.version_received
    }

    /// Whether a system-info response has arrived.
    pub fn sys_info_received(&self) -> bool {
        self.sys_info_received
    }

    /// Whether a hello response has arrived.
    pub fn hello_received(&self) -> bool {
        self.hello_received
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_unknown() {
        let state = DeviceState::new();
        assert_eq!(state.current_track, None);
        assert!(!state.track_playing);
        assert!(!state.track_counter_armed());
        assert!(state.voice_table.iter().all(Option::is_none));
        assert_eq!(state.version(), None);
        assert_eq!(state.num_tracks(), 0);
        assert_eq!(state.num_voices(), 0);
        assert!(!state.version_received());
        assert!(!state.sys_info_received());
        assert!(!state.hello_received());
    }

    #[test]
    fn voice_playing_scans_all_slots() {
        let mut state = DeviceState::new();
        assert!(!state.voice_playing(9));

        state.voice_table[13] = Some(9);
        assert!(state.voice_playing(9));
        assert!(!state.voice_playing(10));
    }

    #[test]
    fn current_track_requires_playing_flag() {
        let mut state = DeviceState::new();
        state.current_track = Some(5);
        assert!(!state.current_track_playing(5));

        state.track_playing = true;
        assert!(state.current_track_playing(5));
        assert!(!state.current_track_playing(6));
    }

    #[test]
    fn track_counter_latch() {
        let mut state = DeviceState::new();
        assert!(!state.track_counter_armed());
        state.arm_track_counter();
        assert!(state.track_counter_armed());
    }
}
