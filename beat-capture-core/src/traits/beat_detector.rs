use crate::models::audio_models::BeatFlags;

/// Beat-detection engine fed with one energy value per audio frame.
///
/// Flags are false until the first push and only change inside `push`.
/// The history must have a fixed capacity so `push` can run once per frame
/// forever. Resources are released on drop.
pub trait BeatDetector {
    /// Append one energy value and recompute both flags.
    fn push(&mut self, energy: f32);

    fn is_bass_beat(&self) -> bool;

    fn is_treble_beat(&self) -> bool;

    fn flags(&self) -> BeatFlags {
        BeatFlags {
            bass: self.is_bass_beat(),
            treble: self.is_treble_beat(),
        }
    }
}

/// Constructs a detector with a given history length.
///
/// Any `FnMut(usize) -> D` closure is a factory, so
/// `EnergyBeatDetector::new` or `|len| FakeDetector::scripted(..)` both work.
pub trait BeatDetectorFactory {
    type Detector: BeatDetector;

    fn construct(&mut self, history_len: usize) -> Self::Detector;
}

impl<D, F> BeatDetectorFactory for F
where
    D: BeatDetector,
    F: FnMut(usize) -> D,
{
    type Detector = D;

    fn construct(&mut self, history_len: usize) -> D {
        self(history_len)
    }
}
