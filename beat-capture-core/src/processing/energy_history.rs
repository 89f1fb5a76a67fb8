/// Fixed-capacity window of the most recent energy values.
///
/// Pushing into a full window evicts the oldest value. Keeps a running sum
/// and sum of squares so mean and variance are O(1) per frame.
#[derive(Debug, Clone)]
pub struct EnergyHistory {
    buffer: Vec<f32>,
    write_index: usize,
    len: usize,
    sum: f64,
    sum_sq: f64,
}

impl EnergyHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(1)],
            write_index: 0,
            len: 0,
            sum: 0.0,
            sum_sq: 0.0,
        }
    }

    /// Append a value, evicting the oldest if the window is full.
    pub fn push(&mut self, value: f32) {
        let capacity = self.buffer.len();
        if self.len == capacity {
            let evicted = self.buffer[self.write_index] as f64;
            self.sum -= evicted;
            self.sum_sq -= evicted * evicted;
        } else {
            self.len += 1;
        }

        self.buffer[self.write_index] = value;
        self.write_index = (self.write_index + 1) % capacity;
        self.sum += value as f64;
        self.sum_sq += value as f64 * value as f64;
    }

    pub fn mean(&self) -> f32 {
        if self.len == 0 {
            return 0.0;
        }
        (self.sum / self.len as f64) as f32
    }

    /// Population standard deviation of the window.
    pub fn std_dev(&self) -> f32 {
        if self.len == 0 {
            return 0.0;
        }
        let n = self.len as f64;
        let mean = self.sum / n;
        // Running sums can drift a hair below zero.
        let variance = (self.sum_sq / n - mean * mean).max(0.0);
        variance.sqrt() as f32
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}
