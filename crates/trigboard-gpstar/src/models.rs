//! Board model definitions.
//!
//! Each supported board is described by a [`BoardModel`] that captures its
//! default serial parameters and capabilities. These are compile-time
//! constants used by the driver to decide how to interpret playback
//! telemetry and which commands to refuse.
//!
//! | Model        | Baud  | Playback telemetry   | Handshake      |
//! |--------------|-------|----------------------|----------------|
//! | GPStar Audio | 57600 | current-track report | hello          |
//! | WAV Trigger  | 57600 | per-voice reports    | version + info |
//!
//! The two models speak the same frame format; GPStar Audio's firmware
//! descends from the WAV Trigger serial protocol and extends it with the
//! hello handshake, status polling, and board-config commands.

use trigboard_core::{BoardCapabilities, BoardDefinition, Vendor};

use crate::state::MAX_VOICES;

/// Static model definition for a supported board.
///
/// Contains everything needed to talk to a specific board over its serial
/// link, including the default baud rate and a full capability
/// description.
#[derive(Debug, Clone)]
pub struct BoardModel {
    /// Human-readable model name (e.g. "GPStar Audio").
    pub name: &'static str,
    /// Machine-readable model identifier (e.g. "gpstar-audio").
    pub model_id: &'static str,
    /// Board vendor.
    pub vendor: Vendor,
    /// Default serial baud rate.
    pub default_baud_rate: u32,
    /// Full capability description for this model.
    pub capabilities: BoardCapabilities,
}

impl From<&BoardModel> for BoardDefinition {
    fn from(model: &BoardModel) -> Self {
        BoardDefinition {
            vendor: model.vendor,
            model_name: model.name,
            default_baud_rate: model.default_baud_rate,
            capabilities: model.capabilities.clone(),
        }
    }
}

/// GPStar Audio model definition.
///
/// GPStar Audio is a 14-voice polyphonic trigger board built for prop
/// electronics. It reports playback through extended track reports
/// (a single current-track status) and identifies itself through the
/// hello handshake, which carries voice/track counts and a firmware
/// version word.
pub fn gpstar_audio() -> BoardModel {
    BoardModel {
        name: "GPStar Audio",
        model_id: "gpstar-audio",
        vendor: Vendor::GpstarTechnologies,
        default_baud_rate: 57_600,
        capabilities: BoardCapabilities {
            voice_table: false,
            num_voices: MAX_VOICES as u8,
            hello: true,
            version_string: false,
            sys_info: false,
            track_status: true,
            status_led: true,
            short_overload: true,
            track_force: true,
            queue: true,
            amp_power: false,
            samplerate_offset: false,
            reporting: false,
            trigger_bank: false,
        },
    }
}

/// WAV Trigger model definition.
///
/// The original 14-voice trigger board. Reports playback per voice
/// (track-report frames maintain the voice table) and identifies itself
/// through the version-string and system-info requests.
pub fn wav_trigger() -> BoardModel {
    BoardModel {
        name: "WAV Trigger",
        model_id: "wav-trigger",
        vendor: Vendor::Robertsonics,
        default_baud_rate: 57_600,
        capabilities: BoardCapabilities {
            voice_table: true,
            num_voices: MAX_VOICES as u8,
            hello: false,
            version_string: true,
            sys_info: true,
            track_status: false,
            status_led: false,
            short_overload: false,
            track_force: false,
            queue: false,
            amp_power: true,
            samplerate_offset: true,
            reporting: true,
            trigger_bank: true,
        },
    }
}

/// All models this backend supports.
pub fn all_models() -> Vec<BoardModel> {
    vec![gpstar_audio(), wav_trigger()]
}

/// Look up a model by its `model_id`.
pub fn model_by_id(id: &str) -> Option<BoardModel> {
    all_models().into_iter().find(|m| m.model_id == id)
}
