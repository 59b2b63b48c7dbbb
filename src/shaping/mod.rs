//! Output shaping. A cubic soft clipper, `y = x - x^3 / 3`, applied to every
//! output sample. Near zero it is linear, and its gain falls off smoothly as
//! the level grows.

mod saturation;

pub use saturation::{saturate, saturate_in_place, saturate_sample, LANES};
