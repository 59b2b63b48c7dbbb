//! Equal tempered reference frequencies for one octave, A4 = 440 Hz.

/// The number of chromatic scale degrees in an octave.
pub const DEGREE_COUNT: usize = 12;

/// Frequencies in Hz of the chromatic degrees of the octave starting at
/// middle C. Index 0 is C, index 9 is A4 at 440 Hz.
pub const NOTE_FREQUENCIES: [f32; DEGREE_COUNT] = [
    261.63, 277.18, 293.66, 311.13, 329.63, 349.23, 369.99, 392.00, 415.30, 440.00, 466.16,
    493.88,
];

/// Display names of the chromatic degrees, index 0 is C.
pub const DEGREE_NAMES: [&str; DEGREE_COUNT] = [
    "C", "C#/D♭", "D", "D#/E♭", "E", "F", "F#/G♭", "G", "G#/A♭", "A", "A#/B♭", "B",
];

/// Returns the table frequency of `degree`, wrapping degrees outside 0..12.
pub fn degree_frequency(degree: i32) -> f32 {
    NOTE_FREQUENCIES[degree.rem_euclid(DEGREE_COUNT as i32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_equal_tempered() {
        let semitone_ratio = 2.0_f32.powf(1.0 / 12.0);
        for degree in 1..DEGREE_COUNT {
            let ratio = NOTE_FREQUENCIES[degree] / NOTE_FREQUENCIES[degree - 1];
            assert!((ratio - semitone_ratio).abs() < 1e-3);
        }
        assert_eq!(NOTE_FREQUENCIES[9], 440.0);
    }

    #[test]
    fn test_degree_frequency_wraps() {
        assert_eq!(degree_frequency(0), 261.63);
        assert_eq!(degree_frequency(14), 293.66);
        assert_eq!(degree_frequency(-1), 493.88);
    }
}
