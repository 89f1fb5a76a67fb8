use serde::{Deserialize, Serialize};

use super::audio_models::SampleSpec;
use super::error::CaptureError;

/// What `pulse()` does with the detector when a read fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadFailurePolicy {
    /// Push the energy of the stale buffer left by the last good read.
    #[default]
    PushStale,
    /// Leave the detector untouched for that frame.
    SkipPush,
}

/// Tuning for the default `EnergyBeatDetector`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorTuning {
    /// Bass beat when |energy| exceeds this multiple of the mean |energy|.
    pub bass_threshold: f32,
    /// Treble beat when flux exceeds mean flux plus this many std-devs.
    pub treble_threshold: f32,
    /// Minimum |energy| for a bass beat.
    pub bass_floor: f32,
    /// Minimum flux for a treble beat.
    pub treble_floor: f32,
}

impl Default for DetectorTuning {
    fn default() -> Self {
        Self {
            bass_threshold: 1.4,
            treble_threshold: 1.5,
            bass_floor: 0.05,
            treble_floor: 0.02,
        }
    }
}

/// Configuration for a capture driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfiguration {
    /// Stream format requested from the server (default: f32le, 2 ch, 44100 Hz).
    pub sample_spec: SampleSpec,

    /// Frames per read (default: 32). The per-read byte budget is
    /// `frames_per_read * sample_width`; channel count is not multiplied in.
    pub frames_per_read: usize,

    /// History length handed to the beat detector (default: 4096).
    pub beat_history_len: usize,

    /// Text that marks a sink status line as running (default: "RUNNING").
    pub active_marker: String,

    /// Client name shown by the audio server.
    pub app_name: String,

    /// Stream description shown by the audio server.
    pub stream_name: String,

    pub read_failure_policy: ReadFailurePolicy,

    pub detector: DetectorTuning,
}

impl CaptureConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_spec.rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if self.sample_spec.channels == 0 {
            return Err("channel count must be positive".into());
        }
        if self.frames_per_read == 0 {
            return Err("frames per read must be positive".into());
        }
        if self.beat_history_len == 0 {
            return Err("beat history length must be positive".into());
        }
        if self.active_marker.is_empty() {
            return Err("active marker must not be empty".into());
        }
        Ok(())
    }

    /// Bytes requested from the server on every read.
    pub fn block_len(&self) -> usize {
        self.frames_per_read * self.sample_spec.sample_width()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CaptureError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CaptureError::Configuration(format!("invalid configuration: {}", e)))?;
        config.validate().map_err(CaptureError::Configuration)?;
        Ok(config)
    }
}

impl Default for CaptureConfiguration {
    fn default() -> Self {
        Self {
            sample_spec: SampleSpec::default(),
            frames_per_read: 32,
            beat_history_len: 4096,
            active_marker: "RUNNING".into(),
            app_name: "pulse-beat".into(),
            stream_name: "beat capture".into(),
            read_failure_policy: ReadFailurePolicy::PushStale,
            detector: DetectorTuning::default(),
        }
    }
}
