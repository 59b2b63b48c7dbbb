//! Error types for corrector configuration.

use thiserror::Error;

/// Reasons a [CorrectorConfig](crate::corrector::CorrectorConfig) can be rejected.
/// Block processing itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Sample rate must be positive and finite
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(f32),

    /// Block size must be greater than zero
    #[error("Invalid block size: {0}")]
    InvalidBlockSize(usize),

    /// The lag search range must be non-empty
    #[error("Invalid lag range: {min} - {max} samples")]
    InvalidLagRange { min: usize, max: usize },

    /// The lookback buffer cannot hold what the analysis and shifter need
    #[error("Lookback buffer too small: need {required} samples, capacity is {capacity}")]
    LookbackTooSmall { required: usize, capacity: usize },

    /// The voiced frequency range must be non-empty and positive
    #[error("Invalid voiced frequency range: {min} - {max} Hz")]
    InvalidVoicedRange { min: f32, max: f32 },

    /// The semitone reference frequency must be positive
    #[error("Invalid reference frequency: {0} Hz")]
    InvalidReference(f32),

    /// Shifter grain must span at least two samples
    #[error("Invalid grain size: {0}")]
    InvalidGrainSize(usize),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
