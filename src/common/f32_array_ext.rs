//! `[f32]` extensions.

use micromath::F32Ext;

/// `[f32]` extensions.
pub trait F32ArrayExt {
    /// Returns the sum of squared samples.
    fn energy(&self) -> f32;
    /// Returns the mean of the squared samples, or zero for an empty slice.
    fn mean_square(&self) -> f32;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level. Exactly zero for silence.
    fn rms_level(&self) -> f32;
}

impl F32ArrayExt for [f32] {
    fn energy(&self) -> f32 {
        let mut sum: f32 = 0.;
        for sample in self.iter() {
            sum += sample * sample
        }
        sum
    }

    fn mean_square(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        };
        self.energy() / (self.len() as f32)
    }

    fn rms_level(&self) -> f32 {
        let mean_square = self.mean_square();
        if !(mean_square > 0.0) {
            return 0.0;
        }
        // micromath's sqrt is a few percent off. Two Newton steps bring it
        // down to rounding error.
        let mut estimate = F32Ext::sqrt(mean_square);
        for _ in 0..2 {
            estimate = 0.5 * (estimate + mean_square / estimate);
        }
        estimate
    }
}
