use micromath::F32Ext;

use crate::common::RingBuffer;

/// A pitch shifter reading the lookback buffer through two delay taps.
///
/// Each tap's delay sweeps through a window of `grain_size` samples at a rate of
/// `1 - ratio` samples per sample, so the tap plays back the input at `ratio` times
/// its speed. When a tap's delay wraps around, its gain is zero. The second tap
/// lags the first by half a grain, and the triangular gains of the two taps
/// always sum to one.
pub struct DelayLineShifter {
    grain_size: usize,
}

impl DelayLineShifter {
    pub fn new(grain_size: usize) -> Self {
        if grain_size < 2 {
            panic!("Grain size must be at least 2")
        }
        DelayLineShifter { grain_size }
    }

    /// The lookback capacity `shift` needs for blocks of up to `block_size` samples.
    /// The deepest read is below `block_size - 1 + grain_size`, plus one sample
    /// for interpolation.
    pub fn required_capacity(block_size: usize, grain_size: usize) -> usize {
        block_size + grain_size + 2
    }

    /// Writes the shifted version of the `output.len()` most recent samples in
    /// `lookback` to `output`. The ratio moves linearly from `from_ratio` to
    /// `to_ratio` over the block. Returns the tap phase to pass to the next call.
    pub fn shift(
        &self,
        lookback: &RingBuffer,
        phase: f32,
        from_ratio: f32,
        to_ratio: f32,
        output: &mut [f32],
    ) -> f32 {
        let len = output.len();
        let grain = self.grain_size as f32;
        let ratio_step = (to_ratio - from_ratio) / (len.max(1) as f32);
        let mut phase = phase;

        for (index, value) in output.iter_mut().enumerate() {
            let ratio = from_ratio + ratio_step * ((index + 1) as f32);
            phase = wrap_phase(phase + (1.0 - ratio) / grain);

            let age = (len - 1 - index) as f32;
            let other_phase = wrap_phase(phase + 0.5);
            let first = lookback.read_interpolated(age + phase * grain);
            let second = lookback.read_interpolated(age + other_phase * grain);
            *value = tap_gain(phase) * first + tap_gain(other_phase) * second;
        }

        phase
    }
}

/// Triangular tap gain, 0 at the ends of the grain and 1 in the middle.
#[inline]
pub fn tap_gain(phase: f32) -> f32 {
    1.0 - F32Ext::abs(2.0 * phase - 1.0)
}

#[inline]
fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase - F32Ext::floor(phase);
    // floor rounding can leave exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
