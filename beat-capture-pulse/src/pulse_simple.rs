//! Record-mode capture through the PulseAudio simple API (`pa_simple`).
//!
//! Opens a blocking record stream on a sink index. PulseAudio accepts a sink
//! index as the device of a record stream and attaches to that sink's
//! monitor, so we hear everything being played there.

use libpulse_binding::error::PAErr;
use libpulse_binding::sample::{Format, Spec};
use libpulse_binding::stream::Direction;
use libpulse_simple_binding::Simple;

use beat_capture_core::models::audio_models::{DeviceId, SampleFormat, SampleSpec};
use beat_capture_core::models::error::CaptureError;
use beat_capture_core::traits::capture_provider::{CaptureProvider, CaptureStream, StreamNames};

/// Connects to the default PulseAudio server.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulseSimpleProvider;

impl PulseSimpleProvider {
    pub fn new() -> Self {
        Self
    }
}

fn pa_spec(spec: &SampleSpec) -> Spec {
    let format = match spec.format {
        SampleFormat::Float32Le => Format::F32le,
    };
    Spec {
        format,
        channels: spec.channels,
        rate: spec.rate,
    }
}

fn describe(err: PAErr) -> String {
    format!("{}", err)
}

impl CaptureProvider for PulseSimpleProvider {
    type Stream = PulseSimpleStream;

    fn connect(
        &mut self,
        device: &DeviceId,
        spec: &SampleSpec,
        names: StreamNames<'_>,
    ) -> Result<PulseSimpleStream, CaptureError> {
        let spec = pa_spec(spec);
        if !spec.is_valid() {
            return Err(CaptureError::Configuration(format!(
                "sample spec not accepted by PulseAudio: {:?}",
                spec
            )));
        }

        let simple = Simple::new(
            None,
            names.app_name,
            Direction::Record,
            Some(device.as_str()),
            names.stream_name,
            &spec,
            None,
            None,
        )
        .map_err(|e| CaptureError::Connection {
            code: e.0,
            message: describe(e),
        })?;

        Ok(PulseSimpleStream { simple })
    }
}

/// A live `pa_simple` record stream. The connection is freed on drop.
pub struct PulseSimpleStream {
    simple: Simple,
}

impl CaptureStream for PulseSimpleStream {
    fn read(&mut self, block: &mut [u8]) -> Result<(), CaptureError> {
        self.simple.read(block).map_err(|e| CaptureError::Read {
            code: e.0,
            message: describe(e),
        })
    }
}
