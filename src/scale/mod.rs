//! Musical scale handling: the reference frequency table, the set of enabled
//! scale degrees and snapping of detected frequencies to that set.
//!
//! # Examples
//! ```
//! use micro_tune::scale::{snap, ScaleMask};
//!
//! // Only C enabled. A D4 is pulled down to C4.
//! let mask = ScaleMask::from_bits(0b0000_0000_0001);
//! let target = snap(293.66, mask);
//! assert!((target - 261.63).abs() < 0.01);
//!
//! // Notes already in the scale are left alone.
//! assert_eq!(snap(293.66, ScaleMask::major(0)), 293.66);
//! ```

mod mask;
mod snapper;
mod table;

pub use mask::ScaleMask;
pub use snapper::{nearest_enabled_offset, snap, Snapper};
pub use table::{degree_frequency, DEGREE_COUNT, DEGREE_NAMES, NOTE_FREQUENCIES};
