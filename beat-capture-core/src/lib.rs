//! # beat-capture-core
//!
//! Platform-agnostic core for capturing whatever the machine is playing and
//! turning it into bass/treble beat flags, one audio frame at a time.
//!
//! Audio-server backends (PulseAudio) implement the `SinkStatusQuery` and
//! `CaptureProvider` traits and plug into the generic `Driver`.
//!
//! ## Architecture
//!
//! ```text
//! beat-capture-core (this crate)
//! ├── traits/       ← SinkStatusQuery, CaptureProvider, CaptureStream, BeatDetector, DriverDelegate
//! ├── models/       ← CaptureError, DriverState, SampleSpec, CaptureConfiguration, SessionSummary
//! ├── processing/   ← SinkResolver, SampleAggregator, EnergyHistory, EnergyBeatDetector
//! └── session/      ← CaptureSession, Driver, SharedDriver
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod traits;

#[cfg(test)]
mod test_support;

// Re-export key types at crate root for convenience.
pub use models::audio_models::{BeatFlags, DeviceId, DriverDiagnostics, SampleFormat, SampleSpec};
pub use models::config::{CaptureConfiguration, DetectorTuning, ReadFailurePolicy};
pub use models::error::CaptureError;
pub use models::session_summary::SessionSummary;
pub use models::state::DriverState;
pub use processing::aggregator::SampleAggregator;
pub use processing::energy_detector::EnergyBeatDetector;
pub use processing::energy_history::EnergyHistory;
pub use processing::sink_resolver::SinkResolver;
pub use session::capture_session::CaptureSession;
pub use session::driver::Driver;
pub use session::shared::SharedDriver;
pub use traits::beat_detector::{BeatDetector, BeatDetectorFactory};
pub use traits::capture_provider::{CaptureProvider, CaptureStream, StreamNames};
pub use traits::driver_delegate::DriverDelegate;
pub use traits::sink_query::SinkStatusQuery;
