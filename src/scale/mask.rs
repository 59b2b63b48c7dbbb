use serde::{Deserialize, Serialize};

use super::table::{DEGREE_COUNT, DEGREE_NAMES};

const ALL_DEGREES: u16 = (1 << DEGREE_COUNT) - 1;

const MAJOR: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const NATURAL_MINOR: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];
const PENTATONIC_MAJOR: [u8; 5] = [0, 2, 4, 7, 9];
const PENTATONIC_MINOR: [u8; 5] = [0, 3, 5, 7, 10];

/// The set of chromatic degrees that are valid correction targets.
/// Bit `i` set means degree `i` (0 = C) is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleMask(u16);

impl ScaleMask {
    /// A mask with every degree disabled.
    pub const fn empty() -> Self {
        ScaleMask(0)
    }

    /// A mask with all twelve degrees enabled.
    pub const fn chromatic() -> Self {
        ScaleMask(ALL_DEGREES)
    }

    /// Builds a mask from the low 12 bits of `bits`. Higher bits are ignored.
    pub fn from_bits(bits: u32) -> Self {
        ScaleMask((bits as u16) & ALL_DEGREES)
    }

    /// Builds a mask from intervals in semitones above `root`.
    pub fn from_intervals(root: u8, intervals: &[u8]) -> Self {
        let mut mask = ScaleMask::empty();
        for interval in intervals {
            let degree = (root as usize + *interval as usize) % DEGREE_COUNT;
            mask.set(degree, true);
        }
        mask
    }

    pub fn major(root: u8) -> Self {
        ScaleMask::from_intervals(root, &MAJOR)
    }

    pub fn natural_minor(root: u8) -> Self {
        ScaleMask::from_intervals(root, &NATURAL_MINOR)
    }

    pub fn pentatonic_major(root: u8) -> Self {
        ScaleMask::from_intervals(root, &PENTATONIC_MAJOR)
    }

    pub fn pentatonic_minor(root: u8) -> Self {
        ScaleMask::from_intervals(root, &PENTATONIC_MINOR)
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    /// Returns true if `degree` is enabled. Degrees wrap around the octave.
    pub fn is_enabled(&self, degree: usize) -> bool {
        self.0 & (1 << (degree % DEGREE_COUNT)) != 0
    }

    pub fn set(&mut self, degree: usize, enabled: bool) {
        let bit = 1 << (degree % DEGREE_COUNT);
        if enabled {
            self.0 |= bit
        } else {
            self.0 &= !bit
        }
    }

    pub fn enabled_count(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates over the names of the enabled degrees, lowest first.
    pub fn enabled_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        DEGREE_NAMES
            .iter()
            .enumerate()
            .filter(move |(degree, _)| self.is_enabled(*degree))
            .map(|(_, name)| *name)
    }
}

impl Default for ScaleMask {
    fn default() -> Self {
        ScaleMask::chromatic()
    }
}
