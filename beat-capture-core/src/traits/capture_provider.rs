use crate::models::audio_models::{DeviceId, SampleSpec};
use crate::models::error::CaptureError;

/// Names the audio server shows for our record stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamNames<'a> {
    pub app_name: &'a str,
    pub stream_name: &'a str,
}

/// Opens record-mode connections to an audio server.
///
/// Implemented by:
/// - `PulseSimpleProvider` (PulseAudio, `pulse` feature)
/// - scripted fakes in tests
pub trait CaptureProvider {
    type Stream: CaptureStream;

    /// Open a record stream on `device` with the fixed `spec`.
    ///
    /// Fails with `CaptureError::Connection` carrying the server's diagnostic.
    fn connect(
        &mut self,
        device: &DeviceId,
        spec: &SampleSpec,
        names: StreamNames<'_>,
    ) -> Result<Self::Stream, CaptureError>;
}

/// A live record-mode connection. Dropping it releases the connection.
pub trait CaptureStream {
    /// Fill `block` completely with the next interleaved samples, blocking
    /// until the server has that many bytes.
    ///
    /// Fails with `CaptureError::Read`. The contents of `block` are
    /// unspecified after a failure; callers must not rely on them.
    fn read(&mut self, block: &mut [u8]) -> Result<(), CaptureError>;
}
