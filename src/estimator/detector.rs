use alloc::boxed::Box;
use alloc::vec;

use super::difference::{difference_function, first_minimum_below, global_minimum, lag_range};
use super::lag_minimum::LagMinimum;
use crate::common::F32ArrayExt;

/// The shortest lag searched by default, i.e the highest detectable frequency
/// is `sample_rate / 20`.
pub const DEFAULT_MIN_LAG: usize = 20;
/// The lag search bound by default (exclusive). At 44.1 kHz the lowest detectable
/// frequency is about 73.5 Hz.
pub const DEFAULT_MAX_LAG: usize = 600;
/// Windows with a mean square level below this are treated as silence.
pub const DEFAULT_POWER_THRESHOLD: f32 = 1e-6;
/// How far above the global minimum, relative to the window energy, an earlier
/// minimum may be and still be preferred.
pub const DEFAULT_OCTAVE_TOLERANCE: f32 = 0.1;

/// Estimates the fundamental frequency of a window of samples by searching for
/// the lag minimizing the squared difference between the window and a shifted copy
/// of itself.
///
/// No memory is allocated apart from the difference buffer on creation.
pub struct PitchEstimator {
    sample_rate: f32,
    min_lag: usize,
    max_lag: usize,
    power_threshold: f32,
    octave_tolerance: f32,
    difference: Box<[f32]>,
    difference_len: usize,
    minimum: LagMinimum,
    frequency: f32,
    lag: f32,
}

impl PitchEstimator {
    pub fn new(sample_rate: f32) -> Self {
        PitchEstimator::from_options(
            sample_rate,
            DEFAULT_MIN_LAG,
            DEFAULT_MAX_LAG,
            DEFAULT_POWER_THRESHOLD,
            DEFAULT_OCTAVE_TOLERANCE,
        )
    }

    pub fn from_options(
        sample_rate: f32,
        min_lag: usize,
        max_lag: usize,
        power_threshold: f32,
        octave_tolerance: f32,
    ) -> Self {
        if !(sample_rate > 0.0) {
            panic!("Sample rate must be greater than 0")
        }
        if min_lag == 0 {
            panic!("Min lag must be greater than 0")
        }
        if max_lag <= min_lag {
            panic!("Max lag must be greater than min lag")
        }

        PitchEstimator {
            sample_rate,
            min_lag,
            max_lag,
            power_threshold,
            octave_tolerance,
            difference: vec![0.0; max_lag - min_lag].into_boxed_slice(),
            difference_len: 0,
            minimum: LagMinimum::new(),
            frequency: 0.0,
            lag: 0.0,
        }
    }

    /// Estimates the pitch of `window` and returns it in Hz, or 0 if no pitch was found.
    /// Windows of any length are accepted; see [lag_range](super::lag_range)
    /// for how the searched lags adapt to short windows.
    pub fn estimate(&mut self, window: &[f32]) -> f32 {
        self.frequency = 0.0;
        self.lag = 0.0;
        self.difference_len = 0;

        let (max_lag, overlap) = match lag_range(window.len(), self.min_lag, self.max_lag) {
            Some(range) => range,
            None => return 0.0,
        };

        let level = window.mean_square();
        if !(level >= self.power_threshold) {
            // Silence, or a window containing NaN
            return 0.0;
        }

        self.difference_len = max_lag - self.min_lag;
        let difference = &mut self.difference[..self.difference_len];
        difference_function(window, self.min_lag, overlap, difference);

        let best_index = match global_minimum(difference) {
            Some(index) => index,
            None => return 0.0,
        };

        // A pure tone has near-zero minima at every multiple of its period. The global
        // minimum may sit on a multiple that happens to land closer to a whole lag,
        // so take the earliest minimum that is about as deep.
        let energy = 2.0 * window[..overlap].energy();
        let threshold = difference[best_index] + self.octave_tolerance * energy;
        let index = first_minimum_below(difference, threshold, best_index);

        self.minimum.set(difference, index);
        self.lag = (self.min_lag as f32) + self.minimum.lag;
        self.frequency = self.sample_rate / self.lag;
        self.frequency
    }

    /// Returns the most recently estimated frequency in Hz, 0 if none was found.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Returns the most recently selected lag in samples (with a fractional part),
    /// 0 if no pitch was found.
    pub fn lag(&self) -> f32 {
        self.lag
    }

    /// Returns the difference function computed by the most recent estimate.
    /// Element `k` corresponds to lag `min_lag + k`.
    pub fn difference(&self) -> &[f32] {
        &self.difference[..self.difference_len]
    }

    /// Returns the most recently selected minimum of the difference function.
    pub fn minimum(&self) -> &LagMinimum {
        &self.minimum
    }

    pub fn min_lag(&self) -> usize {
        self.min_lag
    }

    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// Returns the current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

/// Estimates the pitch of `block` with the default lag range, returning 0 if none was found.
/// Allocates a new estimator on every call; use [PitchEstimator] on the audio thread.
pub fn estimate_pitch(block: &[f32], sample_rate: f32) -> f32 {
    PitchEstimator::new(sample_rate).estimate(block)
}
