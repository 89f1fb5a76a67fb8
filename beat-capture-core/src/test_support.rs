//! Fakes for the query, provider, detector and delegate seams.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::models::audio_models::{BeatFlags, DeviceId, SampleSpec};
use crate::models::error::CaptureError;
use crate::models::state::DriverState;
use crate::traits::beat_detector::BeatDetector;
use crate::traits::capture_provider::{CaptureProvider, CaptureStream, StreamNames};
use crate::traits::driver_delegate::DriverDelegate;
use crate::traits::sink_query::SinkStatusQuery;

pub fn encode(samples: &[f32]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

// --- Sink status query ---

enum LineMode {
    Complete,
    FailAtEnd,
    Unavailable,
}

/// In-memory sink status lines. `Send`, so drivers built on it can move
/// across threads.
pub struct LineQuery {
    lines: Vec<String>,
    mode: LineMode,
    pulled: Arc<AtomicUsize>,
    runs: usize,
}

impl LineQuery {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            mode: LineMode::Complete,
            pulled: Arc::new(AtomicUsize::new(0)),
            runs: 0,
        }
    }

    /// Yields `lines`, then an I/O error.
    pub fn failing_after(lines: &[&str]) -> Self {
        Self {
            mode: LineMode::FailAtEnd,
            ..Self::new(lines)
        }
    }

    /// The query process can't be started.
    pub fn unavailable() -> Self {
        Self {
            mode: LineMode::Unavailable,
            ..Self::new(&[])
        }
    }

    pub fn lines_pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }

    pub fn runs(&self) -> usize {
        self.runs
    }
}

pub struct LineIter {
    lines: VecDeque<io::Result<String>>,
    pulled: Arc<AtomicUsize>,
}

impl Iterator for LineIter {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.pop_front()?;
        self.pulled.fetch_add(1, Ordering::SeqCst);
        Some(line)
    }
}

impl SinkStatusQuery for LineQuery {
    type Lines = LineIter;

    fn query(&mut self) -> Result<LineIter, CaptureError> {
        self.runs += 1;
        let mut lines: VecDeque<io::Result<String>> = self.lines.iter().cloned().map(Ok).collect();
        match self.mode {
            LineMode::Complete => {}
            LineMode::FailAtEnd => lines.push_back(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "query output closed",
            ))),
            LineMode::Unavailable => {
                return Err(CaptureError::DeviceQuery("failed to spawn query: not found".into()))
            }
        }
        Ok(LineIter {
            lines,
            pulled: Arc::clone(&self.pulled),
        })
    }
}

// --- Capture provider ---

/// One scripted outcome of `CaptureStream::read`.
#[derive(Debug, Clone)]
pub enum ReadStep {
    Samples(Vec<f32>),
    Fail,
    /// Write these samples into the block, then fail.
    PartialThenFail(Vec<f32>),
}

#[derive(Debug, Default)]
pub struct FakeLog {
    pub connects: Vec<(DeviceId, SampleSpec, String)>,
    pub reads: usize,
    pub streams_dropped: usize,
}

/// Provider whose streams play back a read script. Reads past the end of
/// the script deliver silence.
pub struct FakeProvider {
    script: Option<Vec<ReadStep>>,
    refuse: Option<(i32, String)>,
    log: Arc<Mutex<FakeLog>>,
}

impl FakeProvider {
    pub fn new(script: Vec<ReadStep>) -> Self {
        Self {
            script: Some(script),
            refuse: None,
            log: Arc::new(Mutex::new(FakeLog::default())),
        }
    }

    pub fn refusing(code: i32, message: &str) -> Self {
        Self {
            refuse: Some((code, message.to_string())),
            ..Self::new(vec![])
        }
    }

    pub fn log(&self) -> MutexGuard<'_, FakeLog> {
        self.log.lock()
    }

    pub fn shared_log(&self) -> Arc<Mutex<FakeLog>> {
        Arc::clone(&self.log)
    }
}

impl CaptureProvider for FakeProvider {
    type Stream = FakeStream;

    fn connect(
        &mut self,
        device: &DeviceId,
        spec: &SampleSpec,
        names: StreamNames<'_>,
    ) -> Result<FakeStream, CaptureError> {
        if let Some((code, message)) = &self.refuse {
            return Err(CaptureError::Connection {
                code: *code,
                message: message.clone(),
            });
        }

        self.log
            .lock()
            .connects
            .push((device.clone(), *spec, names.app_name.to_string()));

        Ok(FakeStream {
            script: self.script.take().unwrap_or_default().into(),
            log: Arc::clone(&self.log),
        })
    }
}

pub struct FakeStream {
    script: VecDeque<ReadStep>,
    log: Arc<Mutex<FakeLog>>,
}

fn fill(block: &mut [u8], samples: &[f32]) {
    let bytes = encode(samples);
    let n = bytes.len().min(block.len());
    block[..n].copy_from_slice(&bytes[..n]);
    block[n..].iter_mut().for_each(|b| *b = 0);
}

fn read_error() -> CaptureError {
    CaptureError::Read {
        code: -3,
        message: "Connection terminated".into(),
    }
}

impl CaptureStream for FakeStream {
    fn read(&mut self, block: &mut [u8]) -> Result<(), CaptureError> {
        self.log.lock().reads += 1;
        match self.script.pop_front() {
            Some(ReadStep::Samples(samples)) => {
                fill(block, &samples);
                Ok(())
            }
            Some(ReadStep::Fail) => Err(read_error()),
            Some(ReadStep::PartialThenFail(samples)) => {
                let bytes = encode(&samples);
                let n = bytes.len().min(block.len());
                block[..n].copy_from_slice(&bytes[..n]);
                Err(read_error())
            }
            None => {
                fill(block, &[]);
                Ok(())
            }
        }
    }
}

impl Drop for FakeStream {
    fn drop(&mut self) {
        self.log.lock().streams_dropped += 1;
    }
}

// --- Beat detector ---

#[derive(Debug, Default)]
pub struct DetectorLog {
    pub constructed: Vec<usize>,
    pub pushes: Vec<f32>,
    pub dropped: usize,
}

/// Detector that reports a scripted flag sequence, one entry per push.
pub struct ScriptedDetector {
    script: VecDeque<BeatFlags>,
    flags: BeatFlags,
    log: Arc<Mutex<DetectorLog>>,
}

impl ScriptedDetector {
    /// Factory closure producing scripted detectors that share `log`.
    pub fn factory(
        script: Vec<BeatFlags>,
        log: Arc<Mutex<DetectorLog>>,
    ) -> impl FnMut(usize) -> ScriptedDetector {
        move |history_len| {
            log.lock().constructed.push(history_len);
            ScriptedDetector {
                script: script.clone().into(),
                flags: BeatFlags::default(),
                log: Arc::clone(&log),
            }
        }
    }
}

impl BeatDetector for ScriptedDetector {
    fn push(&mut self, energy: f32) {
        self.log.lock().pushes.push(energy);
        self.flags = self.script.pop_front().unwrap_or_default();
    }

    fn is_bass_beat(&self) -> bool {
        self.flags.bass
    }

    fn is_treble_beat(&self) -> bool {
        self.flags.treble
    }
}

impl Drop for ScriptedDetector {
    fn drop(&mut self) {
        self.log.lock().dropped += 1;
    }
}

// --- Delegate ---

#[derive(Default)]
pub struct RecordingDelegate {
    pub states: Mutex<Vec<DriverState>>,
    pub read_errors: Mutex<Vec<CaptureError>>,
}

impl DriverDelegate for RecordingDelegate {
    fn on_state_changed(&self, state: DriverState) {
        self.states.lock().push(state);
    }

    fn on_read_error(&self, error: &CaptureError) {
        self.read_errors.lock().push(error.clone());
    }
}
