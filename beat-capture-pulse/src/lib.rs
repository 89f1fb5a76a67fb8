//! # beat-capture-pulse
//!
//! PulseAudio backend for beat-capture.
//!
//! Provides:
//! - `CommandSinkQuery`: sink state lines from `pacmd list-sinks` or `pactl list sinks`
//! - `PulseSimpleProvider`: record-mode capture via `pa_simple` (`pulse` feature)
//! - `pulse_driver`: a `Driver` wired to both, with the default energy detector
//!
//! ## Platform Requirements
//! - A running PulseAudio server, or PipeWire with pipewire-pulse
//! - `libpulse-dev` (or equivalent) for linking when the `pulse` feature is on
//!
//! ## Usage
//! ```ignore
//! use beat_capture_core::CaptureConfiguration;
//! use beat_capture_pulse::pulse_driver;
//!
//! let mut driver = pulse_driver(CaptureConfiguration::default());
//! driver.start()?;
//! loop {
//!     let detector = driver.pulse()?;
//!     if detector.is_bass_beat() { /* ... */ }
//! }
//! ```

pub mod sink_query;

#[cfg(all(target_os = "linux", feature = "pulse"))]
pub mod pulse_simple;

pub use sink_query::{CommandSinkQuery, LineFilter, ProcessLines};

#[cfg(all(target_os = "linux", feature = "pulse"))]
pub use pulse_simple::{PulseSimpleProvider, PulseSimpleStream};

#[cfg(all(target_os = "linux", feature = "pulse"))]
use beat_capture_core::{CaptureConfiguration, Driver, EnergyBeatDetector};

/// A driver that finds the running sink with `pacmd`, records from it with
/// `pa_simple`, and feeds an `EnergyBeatDetector` tuned from `config`.
#[cfg(all(target_os = "linux", feature = "pulse"))]
pub fn pulse_driver(
    config: CaptureConfiguration,
) -> Driver<CommandSinkQuery, PulseSimpleProvider, impl FnMut(usize) -> EnergyBeatDetector> {
    let tuning = config.detector;
    Driver::new(
        config,
        CommandSinkQuery::pacmd(),
        PulseSimpleProvider::new(),
        move |history_len| EnergyBeatDetector::with_tuning(history_len, tuning),
    )
}
