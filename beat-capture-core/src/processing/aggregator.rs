/// Reduces one captured block to a single energy value.
///
/// The energy is the plain signed sum of every sample in the block, with
/// channels left interleaved. Positive and negative samples can cancel.
pub struct SampleAggregator;

impl SampleAggregator {
    /// Sum a block of raw f32 little-endian samples.
    ///
    /// A trailing partial sample is ignored.
    pub fn reduce(block: &[u8]) -> f32 {
        block
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .sum()
    }

    /// Sum already-decoded samples.
    pub fn reduce_samples(samples: &[f32]) -> f32 {
        samples.iter().sum()
    }
}
