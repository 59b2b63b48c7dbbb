use alloc::{boxed::Box, vec};

/// A fixed capacity circular buffer holding the most recent `capacity` samples.
///
/// The write cursor always points at the next slot to overwrite, i.e at the
/// oldest sample once the buffer has wrapped. Callers never see raw indices,
/// all access goes through delays relative to the newest sample.
pub struct RingBuffer {
    samples: Box<[f32]>,
    write_cursor: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            panic!("Ring buffer capacity must be greater than 0")
        }
        RingBuffer {
            samples: vec![0.0; capacity].into_boxed_slice(),
            write_cursor: 0,
        }
    }

    /// Returns the fixed number of samples the buffer holds.
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Returns the index of the next slot to write.
    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    /// Appends a single sample, overwriting the oldest one.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        self.samples[self.write_cursor] = sample;
        self.write_cursor += 1;
        if self.write_cursor == self.samples.len() {
            self.write_cursor = 0;
        }
    }

    /// Appends a sequence of samples in order.
    pub fn push_slice(&mut self, samples: &[f32]) {
        let capacity = self.capacity();
        // Only the last `capacity` samples can survive the write.
        let skip = samples.len().saturating_sub(capacity);
        if skip > 0 {
            self.write_cursor = (self.write_cursor + skip) % capacity;
        }
        for sample in samples.iter().skip(skip) {
            self.push(*sample);
        }
    }

    /// Returns the sample written `delay` samples before the newest one.
    /// A delay of 0 is the newest sample. Delays beyond the capacity are clamped
    /// to the oldest sample.
    #[inline]
    pub fn read(&self, delay: usize) -> f32 {
        let capacity = self.capacity();
        let delay = delay.min(capacity - 1);
        let index = (self.write_cursor + capacity - 1 - delay) % capacity;
        self.samples[index]
    }

    /// Reads at a fractional delay using linear interpolation between
    /// the two surrounding samples.
    #[inline]
    pub fn read_interpolated(&self, delay: f32) -> f32 {
        let max_delay = (self.capacity() - 1) as f32;
        let delay = if delay > 0.0 { delay.min(max_delay) } else { 0.0 };
        let whole = delay as usize;
        let frac = delay - whole as f32;
        let newer = self.read(whole);
        let older = self.read(whole + 1);
        newer + frac * (older - newer)
    }

    /// Copies the most recent `destination.len()` samples into `destination`
    /// in time order, oldest first. If the destination is longer than the
    /// buffer, the leading part is zero filled.
    pub fn copy_latest(&self, destination: &mut [f32]) {
        let capacity = self.capacity();
        let count = destination.len().min(capacity);
        let padding = destination.len() - count;
        for value in destination[..padding].iter_mut() {
            *value = 0.0;
        }
        let start = (self.write_cursor + capacity - count) % capacity;
        for (offset, value) in destination[padding..].iter_mut().enumerate() {
            *value = self.samples[(start + offset) % capacity];
        }
    }

    /// Zeroes all samples and moves the write cursor back to the start.
    pub fn clear(&mut self) {
        for sample in self.samples.iter_mut() {
            *sample = 0.0;
        }
        self.write_cursor = 0;
    }
}
