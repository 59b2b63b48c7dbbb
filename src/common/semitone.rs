use micromath::F32Ext;

/// Converts a frequency in Hz to a [MIDI](https://en.wikipedia.org/wiki/MIDI) note number (with a fractional part).
pub fn freq_to_midi_note(freq: f32) -> f32 {
    12.0 * F32Ext::log2(freq) - 36.376316562295926
}

/// Returns the signed distance in semitones (with a fractional part)
/// from `reference` to `freq`. Both frequencies must be positive.
pub fn semitones_between(reference: f32, freq: f32) -> f32 {
    // micromath's log2 is only accurate enough for arguments above 1, so take
    // the difference of two note numbers rather than the log of the ratio.
    freq_to_midi_note(freq) - freq_to_midi_note(reference)
}

/// Returns the whole number of semitones closest to the distance
/// from `reference` to `freq`.
pub fn nearest_semitone(reference: f32, freq: f32) -> i32 {
    F32Ext::round(semitones_between(reference, freq)) as i32
}

/// Returns 2 raised to `octave`, computed exactly by repeated doubling or halving.
pub fn octave_multiplier(octave: i32) -> f32 {
    let mut multiplier = 1.0_f32;
    if octave >= 0 {
        for _ in 0..octave {
            multiplier *= 2.0;
        }
    } else {
        for _ in 0..(-octave) {
            multiplier *= 0.5;
        }
    }
    multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_approximate_note_number() {
        // The hz to midi note conversion relies on the approximate log2
        // function of the micromath crate. This test compares this
        // approximation to std's log2 and makes sure the difference
        // is acceptable.

        // The maximum acceptable error in cents. 0.1 is 1/1000th of a semitone.
        let max_cent_error = 0.11_f32;
        for i in 1..10000 {
            let f = i as f32;
            let actual_note_number = 12.0 * (f / 440.0).log2() + 69.0;
            let approx_note_number = freq_to_midi_note(f);
            let delta_cents = 100. * (actual_note_number - approx_note_number);
            assert!(delta_cents.abs() <= max_cent_error);
        }
    }

    #[test]
    fn test_nearest_semitone() {
        let middle_c = 261.63;
        assert_eq!(nearest_semitone(middle_c, middle_c), 0);
        assert_eq!(nearest_semitone(middle_c, 293.66), 2);
        assert_eq!(nearest_semitone(middle_c, 440.0), 9);
        assert_eq!(nearest_semitone(middle_c, 523.25), 12);
        assert_eq!(nearest_semitone(middle_c, 130.81), -12);
        assert_eq!(nearest_semitone(middle_c, 123.47), -13);
        // A quarter tone above D rounds back to D
        assert_eq!(nearest_semitone(middle_c, 293.66 * 1.0145), 2);
    }

    #[test]
    fn test_nearest_semitone_of_every_tempered_note() {
        let middle_c = 261.63_f32;
        // 80 Hz to 1200 Hz is roughly 20 semitones below to 26 above middle C
        for semitone in -20..=26 {
            let freq = middle_c * 2.0_f32.powf(semitone as f32 / 12.0);
            assert_eq!(nearest_semitone(middle_c, freq), semitone, "{} Hz", freq);
            let distance = semitones_between(middle_c, freq);
            assert!((distance - semitone as f32).abs() < 0.01);
        }
    }

    #[test]
    fn test_octave_multiplier() {
        assert_eq!(octave_multiplier(0), 1.0);
        assert_eq!(octave_multiplier(3), 8.0);
        assert_eq!(octave_multiplier(-2), 0.25);
    }
}
