use serde::{Deserialize, Serialize};

use super::mask::ScaleMask;
use super::table::{degree_frequency, DEGREE_COUNT, NOTE_FREQUENCIES};
use crate::common::{nearest_semitone, octave_multiplier};

/// Maps detected frequencies to the nearest frequency allowed by a [ScaleMask].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapper {
    /// Frequencies below this are treated as unvoiced and pass through.
    pub min_frequency: f32,
    /// Frequencies above this are treated as unvoiced and pass through.
    pub max_frequency: f32,
    /// The frequency of degree 0 in the octave the semitone count starts from.
    pub reference: f32,
}

impl Default for Snapper {
    fn default() -> Self {
        Snapper {
            min_frequency: 80.0,
            max_frequency: 1200.0,
            reference: NOTE_FREQUENCIES[0],
        }
    }
}

impl Snapper {
    /// Returns true if `freq` lies in the range where correction applies.
    pub fn is_voiced(&self, freq: f32) -> bool {
        freq >= self.min_frequency && freq <= self.max_frequency
    }

    /// Returns the correction target for `detected`.
    ///
    /// * Outside the voiced range, and for an all-disabled mask, `detected` is returned unchanged.
    /// * If the nearest degree is enabled, `detected` is already on the scale and is returned unchanged.
    /// * Otherwise the result is the table frequency of the nearest enabled degree,
    ///   in the octave implied by `detected`.
    pub fn snap(&self, detected: f32, mask: ScaleMask) -> f32 {
        if !self.is_voiced(detected) || mask.is_empty() {
            return detected;
        }

        let semitone = nearest_semitone(self.reference, detected);
        let degree = semitone.rem_euclid(DEGREE_COUNT as i32) as usize;
        if mask.is_enabled(degree) {
            return detected;
        }

        match nearest_enabled_offset(degree, mask) {
            Some(offset) => {
                let target = semitone + offset;
                let octave = target.div_euclid(DEGREE_COUNT as i32);
                let tuning = self.reference / NOTE_FREQUENCIES[0];
                degree_frequency(target) * tuning * octave_multiplier(octave)
            }
            None => detected,
        }
    }
}

/// Returns the signed chromatic distance from `degree` to the closest enabled degree,
/// wrapping across the octave boundary. Ties go to the lower pitch. Returns `None`
/// for an empty mask.
pub fn nearest_enabled_offset(degree: usize, mask: ScaleMask) -> Option<i32> {
    if mask.is_enabled(degree) {
        return Some(0);
    }
    let count = DEGREE_COUNT as i32;
    let degree = degree as i32;
    for distance in 1..=(count / 2) {
        if mask.is_enabled((degree - distance).rem_euclid(count) as usize) {
            return Some(-distance);
        }
        if mask.is_enabled((degree + distance).rem_euclid(count) as usize) {
            return Some(distance);
        }
    }
    None
}

/// Snaps `detected` using the default 80 - 1200 Hz voiced range and middle C reference.
pub fn snap(detected: f32, mask: ScaleMask) -> f32 {
    Snapper::default().snap(detected, mask)
}
