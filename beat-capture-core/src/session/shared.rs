use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::audio_models::BeatFlags;
use crate::models::error::CaptureError;
use crate::models::session_summary::SessionSummary;
use crate::models::state::DriverState;
use crate::session::driver::Driver;
use crate::traits::beat_detector::{BeatDetector, BeatDetectorFactory};
use crate::traits::capture_provider::CaptureProvider;
use crate::traits::sink_query::SinkStatusQuery;

/// A `Driver` behind a single lock, for callers that start, pulse and stop
/// from different threads.
///
/// None of start/pulse/stop is safe to interleave, so all three take the
/// same lock. `pulse()` holds it for the whole blocking read and returns a
/// copy of the flags instead of a reference.
pub struct SharedDriver<Q, P, F>
where
    Q: SinkStatusQuery,
    P: CaptureProvider,
    F: BeatDetectorFactory,
{
    inner: Arc<Mutex<Driver<Q, P, F>>>,
}

impl<Q, P, F> SharedDriver<Q, P, F>
where
    Q: SinkStatusQuery,
    P: CaptureProvider,
    F: BeatDetectorFactory,
{
    pub fn new(driver: Driver<Q, P, F>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(driver)),
        }
    }

    pub fn start(&self) -> Result<(), CaptureError> {
        self.inner.lock().start()
    }

    pub fn pulse(&self) -> Result<BeatFlags, CaptureError> {
        self.inner.lock().pulse().map(|detector| detector.flags())
    }

    pub fn stop(&self) -> Option<SessionSummary> {
        self.inner.lock().stop()
    }

    pub fn state(&self) -> DriverState {
        self.inner.lock().state()
    }

    /// Run `f` with exclusive access to the driver.
    pub fn with_driver<R>(&self, f: impl FnOnce(&mut Driver<Q, P, F>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<Q, P, F> Clone for SharedDriver<Q, P, F>
where
    Q: SinkStatusQuery,
    P: CaptureProvider,
    F: BeatDetectorFactory,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
