use crate::models::config::DetectorTuning;
use crate::processing::energy_history::EnergyHistory;
use crate::traits::beat_detector::BeatDetector;

/// Default beat detector driven by the per-frame energy value.
///
/// - Bass beat: |energy| jumps above `bass_threshold` times the recent mean.
/// - Treble beat: the frame-to-frame change in energy (flux) jumps above the
///   recent mean flux by `treble_threshold` standard deviations.
///
/// Both comparisons are against history *before* the new value is added, and
/// both have an absolute floor so silence never fires. Non-finite energy
/// values are pushed as 0.0.
#[derive(Debug, Clone)]
pub struct EnergyBeatDetector {
    tuning: DetectorTuning,
    magnitudes: EnergyHistory,
    fluxes: EnergyHistory,
    last_energy: Option<f32>,
    bass_beat: bool,
    treble_beat: bool,
}

impl EnergyBeatDetector {
    pub fn new(history_len: usize) -> Self {
        Self::with_tuning(history_len, DetectorTuning::default())
    }

    pub fn with_tuning(history_len: usize, tuning: DetectorTuning) -> Self {
        Self {
            tuning,
            magnitudes: EnergyHistory::new(history_len),
            fluxes: EnergyHistory::new(history_len),
            last_energy: None,
            bass_beat: false,
            treble_beat: false,
        }
    }

    pub fn history_len(&self) -> usize {
        self.magnitudes.capacity()
    }

}

impl BeatDetector for EnergyBeatDetector {
    fn push(&mut self, energy: f32) {
        let energy = if energy.is_finite() { energy } else { 0.0 };
        let magnitude = energy.abs();
        let flux = self.last_energy.map_or(0.0, |last| (energy - last).abs());

        self.bass_beat = !self.magnitudes.is_empty()
            && magnitude > self.tuning.bass_floor
            && magnitude > self.magnitudes.mean() * self.tuning.bass_threshold;

        self.treble_beat = !self.fluxes.is_empty()
            && flux > self.tuning.treble_floor
            && flux > self.fluxes.mean() + self.fluxes.std_dev() * self.tuning.treble_threshold;

        self.magnitudes.push(magnitude);
        self.fluxes.push(flux);
        self.last_energy = Some(energy);
    }

    fn is_bass_beat(&self) -> bool {
        self.bass_beat
    }

    fn is_treble_beat(&self) -> bool {
        self.treble_beat
    }
}
