use crate::models::audio_models::{DeviceId, SampleSpec};
use crate::models::error::CaptureError;
use crate::traits::capture_provider::{CaptureProvider, CaptureStream, StreamNames};

/// One record-mode connection plus the raw block it reads into.
///
/// The block length is fixed at start. A failed read leaves the block exactly
/// as the last successful read left it: reads land in a scratch block that is
/// only copied over on success.
pub struct CaptureSession<S: CaptureStream> {
    stream: Option<S>,
    device: DeviceId,
    block: Vec<u8>,
    scratch: Vec<u8>,
}

impl<S: CaptureStream> CaptureSession<S> {
    /// Open a stream on `device` and allocate a block of
    /// `frames_per_read * spec.sample_width()` bytes.
    pub fn start<P>(
        provider: &mut P,
        device: DeviceId,
        spec: SampleSpec,
        frames_per_read: usize,
        names: StreamNames<'_>,
    ) -> Result<Self, CaptureError>
    where
        P: CaptureProvider<Stream = S>,
    {
        let block_len = frames_per_read * spec.sample_width();
        if block_len == 0 {
            return Err(CaptureError::Configuration(
                "capture block must not be empty".into(),
            ));
        }

        log::info!("connecting to sink {}...", device);
        let stream = provider.connect(&device, &spec, names)?;
        log::info!(
            "connected to sink {} ({:?}, {} ch, {} Hz, {} bytes per read)",
            device,
            spec.format,
            spec.channels,
            spec.rate,
            block_len
        );

        Ok(Self {
            stream: Some(stream),
            device,
            block: vec![0; block_len],
            scratch: vec![0; block_len],
        })
    }

    /// Read the next block, blocking until the server delivers it.
    pub fn read(&mut self) -> Result<(), CaptureError> {
        let stream = self.stream.as_mut().ok_or_else(|| CaptureError::Read {
            code: 0,
            message: "capture session is stopped".into(),
        })?;

        stream.read(&mut self.scratch)?;
        self.block.copy_from_slice(&self.scratch);
        Ok(())
    }

    /// Contents of the last successful read (zeros before the first one).
    pub fn block(&self) -> &[u8] {
        &self.block
    }

    pub fn block_len(&self) -> usize {
        self.block.len()
    }

    pub fn device(&self) -> &DeviceId {
        &self.device
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Release the connection. Returns whether anything was released;
    /// stopping twice is a no-op.
    pub fn stop(&mut self) -> bool {
        match self.stream.take() {
            Some(stream) => {
                drop(stream);
                log::info!("closed connection to sink {}", self.device);
                true
            }
            None => false,
        }
    }
}

impl<S: CaptureStream> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{encode, FakeProvider, ReadStep};

    const NAMES: StreamNames<'static> = StreamNames {
        app_name: "test",
        stream_name: "test capture",
    };

    fn start(provider: &mut FakeProvider) -> Result<CaptureSession<crate::test_support::FakeStream>, CaptureError> {
        CaptureSession::start(provider, DeviceId::from_index(1), SampleSpec::default(), 32, NAMES)
    }

    #[test]
    fn block_is_frames_times_sample_width() {
        let mut provider = FakeProvider::new(vec![]);
        let session = start(&mut provider).unwrap();

        assert_eq!(session.block_len(), 128);
        assert!(session.block().iter().all(|&b| b == 0));
        assert!(session.is_active());
    }

    #[test]
    fn connects_with_requested_device_and_spec() {
        let mut provider = FakeProvider::new(vec![]);
        let _session = start(&mut provider).unwrap();

        let connects = provider.log().connects.clone();
        assert_eq!(connects, vec![(DeviceId::from_index(1), SampleSpec::default(), "test".to_string())]);
    }

    #[test]
    fn connection_failure_propagates() {
        let mut provider = FakeProvider::refusing(-6, "Connection refused");
        let err = start(&mut provider).err().unwrap();
        assert_eq!(
            err,
            CaptureError::Connection {
                code: -6,
                message: "Connection refused".into()
            }
        );
    }

    #[test]
    fn read_fills_block() {
        let samples = vec![0.25f32; 32];
        let mut provider = FakeProvider::new(vec![ReadStep::Samples(samples.clone())]);
        let mut session = start(&mut provider).unwrap();

        session.read().unwrap();
        assert_eq!(session.block(), encode(&samples).as_slice());
    }

    #[test]
    fn failed_read_leaves_previous_block() {
        let good = vec![0.5f32; 32];
        let mut provider = FakeProvider::new(vec![
            ReadStep::Samples(good.clone()),
            ReadStep::PartialThenFail(vec![9.0; 8]),
        ]);
        let mut session = start(&mut provider).unwrap();

        session.read().unwrap();
        let err = session.read().unwrap_err();

        assert!(matches!(err, CaptureError::Read { .. }));
        assert_eq!(session.block(), encode(&good).as_slice());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut provider = FakeProvider::new(vec![]);
        let mut session = start(&mut provider).unwrap();

        assert!(session.stop());
        assert!(!session.stop());
        assert!(!session.is_active());
        assert_eq!(provider.log().streams_dropped, 1);
    }

    #[test]
    fn read_after_stop_fails_without_touching_block() {
        let mut provider = FakeProvider::new(vec![ReadStep::Samples(vec![1.0; 32])]);
        let mut session = start(&mut provider).unwrap();
        session.stop();

        assert!(session.read().is_err());
        assert!(session.block().iter().all(|&b| b == 0));
        assert_eq!(provider.log().reads, 0);
    }

    #[test]
    fn drop_releases_connection() {
        let mut provider = FakeProvider::new(vec![]);
        {
            let _session = start(&mut provider).unwrap();
        }
        assert_eq!(provider.log().streams_dropped, 1);
    }
}
