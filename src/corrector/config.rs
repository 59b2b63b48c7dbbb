use serde::{Deserialize, Serialize};

use super::shifter::DelayLineShifter;
use crate::error::{ConfigError, ConfigResult};
use crate::estimator::{
    DEFAULT_MAX_LAG, DEFAULT_MIN_LAG, DEFAULT_OCTAVE_TOLERANCE, DEFAULT_POWER_THRESHOLD,
};
use crate::scale::{Snapper, NOTE_FREQUENCIES};

/// Settings for a [PitchCorrector](super::PitchCorrector).
///
/// Missing fields take their default values when deserializing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// The sample rate in Hz.
    pub sample_rate: f32,
    /// The number of samples per processed block. Longer frames are split into
    /// blocks of at most this size.
    pub block_size: usize,
    /// The number of past samples kept for analysis and pitch shifting.
    pub lookback_capacity: usize,
    /// The smallest lag, in samples, searched by the pitch estimator.
    pub min_lag: usize,
    /// The lag, in samples, where the pitch estimator's search stops (exclusive).
    pub max_lag: usize,
    /// The length, in samples, of the delay sweep of each shifter tap.
    pub grain_size: usize,
    /// Detected pitches below this frequency are left uncorrected.
    pub min_voiced_frequency: f32,
    /// Detected pitches above this frequency are left uncorrected.
    pub max_voiced_frequency: f32,
    /// The frequency of scale degree 0 in the reference octave.
    pub reference_frequency: f32,
    /// How far above the deepest difference function minimum, relative to the
    /// window energy, an earlier minimum may be and still be picked.
    pub octave_tolerance: f32,
    /// Analysis windows with a lower mean square level report no pitch.
    pub power_threshold: f32,
    /// The time constant in milliseconds for fading the shifted signal in and out.
    pub wet_ramp_ms: f32,
    /// Per block smoothing coefficient of the envelope follower, in [0, 1].
    pub envelope_smoothing: f32,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            sample_rate: 44100.0,
            block_size: 512,
            lookback_capacity: 2048,
            min_lag: DEFAULT_MIN_LAG,
            max_lag: DEFAULT_MAX_LAG,
            grain_size: 1024,
            min_voiced_frequency: 80.0,
            max_voiced_frequency: 1200.0,
            reference_frequency: NOTE_FREQUENCIES[0],
            octave_tolerance: DEFAULT_OCTAVE_TOLERANCE,
            power_threshold: DEFAULT_POWER_THRESHOLD,
            wet_ramp_ms: 10.0,
            envelope_smoothing: 0.3,
        }
    }
}

impl CorrectorConfig {
    /// The number of samples the pitch estimator looks at per block: the
    /// block itself preceded by `max_lag` samples of history.
    pub fn analysis_window(&self) -> usize {
        self.block_size + self.max_lag
    }

    /// Returns the scale snapper described by this configuration.
    pub fn snapper(&self) -> Snapper {
        Snapper {
            min_frequency: self.min_voiced_frequency,
            max_frequency: self.max_voiced_frequency,
            reference: self.reference_frequency,
        }
    }

    /// Checks that the configuration describes a usable corrector.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.sample_rate > 0.0 && self.sample_rate.is_finite()) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.block_size == 0 {
            return Err(ConfigError::InvalidBlockSize(self.block_size));
        }
        if self.min_lag == 0 || self.max_lag <= self.min_lag {
            return Err(ConfigError::InvalidLagRange {
                min: self.min_lag,
                max: self.max_lag,
            });
        }
        if self.grain_size < 2 {
            return Err(ConfigError::InvalidGrainSize(self.grain_size));
        }
        let min = self.min_voiced_frequency;
        let max = self.max_voiced_frequency;
        if !(min > 0.0 && max > min && max.is_finite()) {
            return Err(ConfigError::InvalidVoicedRange { min, max });
        }
        if !(self.reference_frequency > 0.0 && self.reference_frequency.is_finite()) {
            return Err(ConfigError::InvalidReference(self.reference_frequency));
        }
        let shifter_capacity =
            DelayLineShifter::required_capacity(self.block_size, self.grain_size);
        let required = self.analysis_window().max(shifter_capacity);
        if self.lookback_capacity < required {
            return Err(ConfigError::LookbackTooSmall {
                required,
                capacity: self.lookback_capacity,
            });
        }
        Ok(())
    }
}
