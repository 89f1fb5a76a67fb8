use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw sample encoding requested from the audio server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// 32-bit IEEE float, little-endian.
    Float32Le,
}

impl SampleFormat {
    /// Width of one sample in bytes.
    pub fn sample_width(&self) -> usize {
        match self {
            Self::Float32Le => std::mem::size_of::<f32>(),
        }
    }
}

/// Encoding, channel count and rate of the capture stream.
///
/// Fixed by configuration; never negotiated with the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleSpec {
    pub format: SampleFormat,
    pub channels: u8,
    pub rate: u32,
}

impl SampleSpec {
    pub const fn float32_stereo(rate: u32) -> Self {
        Self {
            format: SampleFormat::Float32Le,
            channels: 2,
            rate,
        }
    }

    pub fn sample_width(&self) -> usize {
        self.format.sample_width()
    }
}

impl Default for SampleSpec {
    fn default() -> Self {
        Self::float32_stereo(44100)
    }
}

/// Index of an output device (sink) as the audio server enumerates it,
/// kept as text because that is how the server addresses devices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn from_index(index: usize) -> Self {
        Self(index.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Zero-based enumeration index, if the id is numeric.
    pub fn index(&self) -> Option<usize> {
        self.0.parse().ok()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a beat detector's two flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BeatFlags {
    pub bass: bool,
    pub treble: bool,
}

impl BeatFlags {
    pub fn any(&self) -> bool {
        self.bass || self.treble
    }
}

/// Live counters for a running driver.
#[derive(Debug, Clone, Default)]
pub struct DriverDiagnostics {
    pub pulses: u64,
    pub read_failures: u64,
    pub skipped_pushes: u64,
    pub last_energy: f32,
}
