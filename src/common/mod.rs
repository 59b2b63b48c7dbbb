//! Common algorithms and utilities.

mod f32_array_ext;
mod ring_buffer;
mod semitone;
mod smoothing;

pub use f32_array_ext::F32ArrayExt;
pub use ring_buffer::RingBuffer;
pub use semitone::{freq_to_midi_note, nearest_semitone, octave_multiplier, semitones_between};
pub use smoothing::OnePole;
