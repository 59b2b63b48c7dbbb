//! Fundamental frequency estimation using the squared difference function.
//!
//! For a window $x$ and a lag $τ$ the difference function is
//! $$ d(τ) = \sum_{i=0}^{L-1} (x_i - x_{i+τ})^2 $$
//! where the overlap length $L$ is the window size minus the largest searched lag,
//! so every lag costs the same. $d$ dips towards zero when $τ$ is a whole number of
//! periods. The estimator scans lags from `min_lag` up to (not including) `max_lag`,
//! keeping the smallest value (ties go to the smallest lag), then
//! * prefers the earliest dip that is nearly as deep as the global minimum, which
//!   guards against locking onto a multiple of the period, and
//! * refines the chosen lag with parabolic interpolation.
//!
//! The frequency is `sample_rate / lag`. Silent windows and empty lag ranges give 0 Hz.
//!
//! # Examples
//! ```
//! use micro_tune::estimator::PitchEstimator;
//!
//! let sample_rate = 44100.0;
//! let window: Vec<f32> = (0..2048)
//!     .map(|i| (2.0 * std::f32::consts::PI * 220.0 * (i as f32) / sample_rate).sin())
//!     .collect();
//!
//! let mut estimator = PitchEstimator::new(sample_rate);
//! let frequency = estimator.estimate(&window);
//! assert!((frequency - 220.0).abs() < 1.0);
//! ```

mod detector;
mod difference;
mod lag_minimum;

pub use detector::{
    estimate_pitch, PitchEstimator, DEFAULT_MAX_LAG, DEFAULT_MIN_LAG, DEFAULT_OCTAVE_TOLERANCE,
    DEFAULT_POWER_THRESHOLD,
};
pub use difference::{difference_function, first_minimum_below, global_minimum, lag_range};
pub use lag_minimum::LagMinimum;
