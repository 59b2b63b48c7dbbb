//! A real time monophonic pitch correction effect.
//!
//! Audio is processed in blocks. For each block, the fundamental frequency is
//! estimated with a squared difference function over a bounded lag range, the
//! estimate is snapped to the nearest enabled degree of a 12 tone scale, the
//! signal is shifted toward that target and the result passes through a cubic
//! soft clipper.
//!
//! Features
//! * No allocations after creation, suitable for real time audio use.
//! * `no_std` compatible (requires `alloc`).
//! * Preset and custom scales, adjustable correction amount and speed.
//! * Four lane SIMD saturation.
//!
//! # Examples
//!
//! Frame processing, the way an audio callback would drive the corrector.
//! ```
//! use micro_tune::{PitchCorrector, ScaleMask};
//!
//! let sample_rate = 44100.0;
//! let mut corrector = PitchCorrector::new(sample_rate);
//! // C major
//! corrector.set_scale_mask(ScaleMask::major(0));
//!
//! let input: Vec<f32> = (0..512)
//!     .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 293.66 * i as f32 / sample_rate).sin())
//!     .collect();
//! let mut output = vec![0.0; 512];
//! corrector.process_frame(&input, &mut output, 0.8, 0.5);
//! println!(
//!     "detected {} Hz, target {} Hz",
//!     corrector.detected_frequency(),
//!     corrector.target_frequency()
//! );
//! ```
//!
//! The building blocks can also be used on their own.
//! ```
//! use micro_tune::{estimate_pitch, snap, ScaleMask};
//!
//! let sample_rate = 44100.0;
//! let window: Vec<f32> = (0..1112)
//!     .map(|i| (2.0 * std::f32::consts::PI * 293.66 * i as f32 / sample_rate).sin())
//!     .collect();
//! let detected = estimate_pitch(&window, sample_rate);
//! // Only C enabled
//! let target = snap(detected, ScaleMask::from_bits(0b0000_0000_0001));
//! assert!((target - 261.63).abs() < 0.01);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod common;
pub mod corrector;
mod error;
pub mod estimator;
pub mod scale;
pub mod shaping;

pub use corrector::{CorrectorConfig, PitchCorrector};
pub use error::{ConfigError, ConfigResult};
pub use estimator::{estimate_pitch, PitchEstimator};
pub use scale::{snap, ScaleMask, Snapper};
pub use shaping::saturate;
