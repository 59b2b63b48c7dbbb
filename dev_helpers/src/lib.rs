mod wav;

pub use wav::{mix_to_mono, read_wav, write_wav};

pub fn note_number_to_string(note_number: f32) -> String {
  let note_names = [
      "    C",
      "C#/D♭",
      "    D",
      "D#/E♭",
      "    E",
      "    F",
      "F#/G♭",
      "    G",
      "G#/A♭",
      "    A",
      "A#/B♭",
      "    B"
  ];
  let nearest_midi_note = note_number.round().max(0.0) as usize;
  // MIDI note 0 is C-1
  let octave = (nearest_midi_note / 12) as i32 - 1;
  let note_in_octave = nearest_midi_note % 12;
  let cent_offset = (100.0 * (note_number - (nearest_midi_note as f32))).round() as i32;
  let cent_sign = if cent_offset > 0 { "+" } else { "-" };
  format!("{}{} | {}{:02} cents", note_names[note_in_octave], octave, cent_sign, cent_offset.abs())
}

/// Formats a frequency as the nearest note, or a placeholder for 0 Hz.
pub fn frequency_to_string(frequency: f32) -> String {
  if frequency > 0.0 {
      note_number_to_string(12.0 * (frequency / 440.0).log2() + 69.0)
  } else {
      "    -".to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_note_names() {
      assert_eq!(note_number_to_string(69.0), "    A4 | -00 cents");
      assert_eq!(note_number_to_string(60.25), "    C4 | +25 cents");
      assert_eq!(frequency_to_string(293.66), "    D4 | -00 cents");
      assert_eq!(frequency_to_string(0.0), "    -");
  }

  #[test]
  fn test_mix_to_mono() {
      assert_eq!(mix_to_mono(&[1.0, 0.0, 0.5, 0.5], 2), vec![0.5, 0.5]);
      assert_eq!(mix_to_mono(&[0.25, 0.5], 1), vec![0.25, 0.5]);
  }
}
