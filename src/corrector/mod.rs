//! The frame processor and the state it carries between blocks.
//!
//! ```
//! use micro_tune::corrector::PitchCorrector;
//! use micro_tune::scale::ScaleMask;
//!
//! let mut corrector = PitchCorrector::new(44100.0);
//! corrector.set_scale_mask(ScaleMask::major(0));
//!
//! let input = [0.0; 512];
//! let mut output = [0.0; 512];
//! corrector.process_frame(&input, &mut output, 0.8, 0.5);
//! assert_eq!(output, [0.0; 512]);
//! ```

mod config;
mod processor;
mod shifter;
mod state;

pub use config::CorrectorConfig;
pub use processor::PitchCorrector;
pub use shifter::{tap_gain, DelayLineShifter};
pub use state::CorrectionState;
