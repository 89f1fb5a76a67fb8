use std::sync::Arc;

use crate::models::audio_models::{DeviceId, DriverDiagnostics};
use crate::models::config::{CaptureConfiguration, ReadFailurePolicy};
use crate::models::error::CaptureError;
use crate::models::session_summary::{SessionInfo, SessionSummary};
use crate::models::state::DriverState;
use crate::processing::aggregator::SampleAggregator;
use crate::processing::sink_resolver::SinkResolver;
use crate::session::capture_session::CaptureSession;
use crate::traits::beat_detector::{BeatDetector, BeatDetectorFactory};
use crate::traits::capture_provider::{CaptureProvider, StreamNames};
use crate::traits::driver_delegate::DriverDelegate;
use crate::traits::sink_query::SinkStatusQuery;

/// Start / pulse / stop lifecycle around one capture session and one
/// beat detector.
///
/// ```text
/// start(): [SinkResolver] → [CaptureSession::start] → [detector factory]
/// pulse(): [CaptureSession::read] → [SampleAggregator] → [BeatDetector::push]
/// stop():  release session + detector
/// ```
///
/// Everything is synchronous. `pulse()` blocks on the server and must not
/// overlap with itself; wrap the driver in a `SharedDriver` to use it from
/// more than one thread.
pub struct Driver<Q, P, F>
where
    Q: SinkStatusQuery,
    P: CaptureProvider,
    F: BeatDetectorFactory,
{
    config: CaptureConfiguration,
    resolver: SinkResolver<Q>,
    provider: P,
    factory: F,
    state: DriverState,
    session: Option<CaptureSession<P::Stream>>,
    detector: Option<F::Detector>,
    info: Option<SessionInfo>,
    diagnostics: DriverDiagnostics,
    delegate: Option<Arc<dyn DriverDelegate>>,
}

impl<Q, P, F> Driver<Q, P, F>
where
    Q: SinkStatusQuery,
    P: CaptureProvider,
    F: BeatDetectorFactory,
{
    pub fn new(config: CaptureConfiguration, query: Q, provider: P, factory: F) -> Self {
        let resolver = SinkResolver::new(query, config.active_marker.clone());
        Self {
            config,
            resolver,
            provider,
            factory,
            state: DriverState::Uninitialized,
            session: None,
            detector: None,
            info: None,
            diagnostics: DriverDiagnostics::default(),
            delegate: None,
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn DriverDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &CaptureConfiguration {
        &self.config
    }

    pub fn diagnostics(&self) -> &DriverDiagnostics {
        &self.diagnostics
    }

    /// Sink the current session is recording from.
    pub fn device(&self) -> Option<&DeviceId> {
        self.session.as_ref().map(|s| s.device())
    }

    /// Byte length of the capture block, while connected.
    pub fn block_len(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.block_len())
    }

    /// The detector, while connected.
    pub fn detector(&self) -> Option<&F::Detector> {
        self.detector.as_ref()
    }

    /// Resolve the running sink, connect to it and construct the detector.
    ///
    /// Valid only from `Uninitialized`. On failure nothing is kept and the
    /// driver stays `Uninitialized`.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if !self.state.can_start() {
            return Err(self.invalid_state("start"));
        }

        self.config
            .validate()
            .map_err(CaptureError::Configuration)?;

        let device = self.resolver.resolve().map_err(|e| {
            log::error!("couldn't find a running sink: {}", e);
            e
        })?;

        let names = StreamNames {
            app_name: &self.config.app_name,
            stream_name: &self.config.stream_name,
        };
        let session = CaptureSession::start(
            &mut self.provider,
            device.clone(),
            self.config.sample_spec,
            self.config.frames_per_read,
            names,
        )
        .map_err(|e| {
            log::error!("couldn't connect to sink {}: {}", device, e);
            e
        })?;

        let detector = self.factory.construct(self.config.beat_history_len);

        self.session = Some(session);
        self.detector = Some(detector);
        self.info = Some(SessionInfo::new(device));
        self.diagnostics = DriverDiagnostics::default();
        self.set_state(DriverState::Connected);
        Ok(())
    }

    /// Read one block, reduce it to an energy value, push it into the
    /// detector and return the detector.
    ///
    /// Valid only while `Connected`. A failed read is reported and the
    /// stale block is used according to the read-failure policy; it never
    /// fails the pulse.
    pub fn pulse(&mut self) -> Result<&F::Detector, CaptureError> {
        if !self.state.can_pulse() {
            return Err(self.invalid_state("pulse"));
        }
        let (Some(session), Some(detector)) = (self.session.as_mut(), self.detector.as_mut()) else {
            return Err(CaptureError::InvalidState {
                operation: "pulse",
                state: self.state,
            });
        };

        self.diagnostics.pulses += 1;

        let push = match session.read() {
            Ok(()) => true,
            Err(e) => {
                self.diagnostics.read_failures += 1;
                log::warn!("{}", e);
                if let Some(ref delegate) = self.delegate {
                    delegate.on_read_error(&e);
                }
                self.config.read_failure_policy == ReadFailurePolicy::PushStale
            }
        };

        if push {
            let energy = SampleAggregator::reduce(session.block());
            detector.push(energy);
            self.diagnostics.last_energy = energy;
        } else {
            self.diagnostics.skipped_pushes += 1;
        }

        Ok(detector)
    }

    /// Release the session and the detector and move to `Stopped`.
    ///
    /// Idempotent. Returns the session summary only from the call that
    /// actually tore a session down.
    pub fn stop(&mut self) -> Option<SessionSummary> {
        match self.state {
            DriverState::Stopped => None,
            DriverState::Uninitialized => {
                self.set_state(DriverState::Stopped);
                None
            }
            DriverState::Connected => {
                if let Some(mut session) = self.session.take() {
                    session.stop();
                }
                self.detector = None;

                let summary = self.info.take().map(|info| {
                    info.finish(self.diagnostics.pulses, self.diagnostics.read_failures)
                });
                if let Some(ref summary) = summary {
                    log::info!(
                        "closed session {} after {} pulses ({} read failures)",
                        summary.id,
                        summary.pulses,
                        summary.read_failures
                    );
                }

                self.set_state(DriverState::Stopped);
                summary
            }
        }
    }

    // --- Internal helpers ---

    fn invalid_state(&self, operation: &'static str) -> CaptureError {
        CaptureError::InvalidState {
            operation,
            state: self.state,
        }
    }

    fn set_state(&mut self, new_state: DriverState) {
        self.state = new_state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(new_state);
        }
    }
}

impl<Q, P, F> Drop for Driver<Q, P, F>
where
    Q: SinkStatusQuery,
    P: CaptureProvider,
    F: BeatDetectorFactory,
{
    fn drop(&mut self) {
        if self.state.is_connected() {
            self.stop();
        }
    }
}
