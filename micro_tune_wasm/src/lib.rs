#[macro_use]
extern crate lazy_static;

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;
use micro_tune::PitchCorrector;

const SAMPLE_RATE: f32 = 44100.;

lazy_static! {
    static ref CORRECTOR: Mutex<PitchCorrector> = Mutex::new(PitchCorrector::new(SAMPLE_RATE));
}

fn corrector() -> MutexGuard<'static, PitchCorrector> {
    // Keep going after a panic on another thread
    CORRECTOR.lock().unwrap_or_else(PoisonError::into_inner)
}

#[no_mangle]
pub extern "C" fn allocate_f32_array(size: usize) -> *mut f32 {
    let mut buf = Vec::<f32>::with_capacity(size);
    let ptr = buf.as_mut_ptr();
    std::mem::forget(buf);
    ptr as *mut f32
}

/// Releases an array returned by `allocate_f32_array` with the same `size`.
#[no_mangle]
pub extern "C" fn free_f32_array(ptr: *mut f32, size: usize) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        drop(Vec::from_raw_parts(ptr, 0, size));
    }
}

/// Enables the scale degrees set in the low 12 bits of `note_mask`, bit 0 being C.
#[no_mangle]
pub extern "C" fn set_key(note_mask: i32) {
    corrector().set_key(note_mask as u32);
}

#[no_mangle]
pub extern "C" fn reset_state() {
    corrector().reset_state();
}

/// Processes `length` samples from `input` into `output`. Null buffers are ignored.
#[no_mangle]
pub extern "C" fn process_frame(
    input: *const f32,
    output: *mut f32,
    length: usize,
    amount: f32,
    speed: f32,
) {
    if input.is_null() || output.is_null() {
        debug!("process_frame called with a null buffer");
        return;
    }
    let input: &[f32] = unsafe { std::slice::from_raw_parts(input, length) };
    let output: &mut [f32] = unsafe { std::slice::from_raw_parts_mut(output, length) };
    corrector().process_frame(input, output, amount, speed);
}

#[no_mangle]
pub extern "C" fn get_detected_frequency() -> f32 {
    corrector().detected_frequency()
}

#[no_mangle]
pub extern "C" fn get_midi_note_number() -> f32 {
    corrector().detected_midi_note_number()
}

#[no_mangle]
pub extern "C" fn get_target_frequency() -> f32 {
    corrector().target_frequency()
}

#[no_mangle]
pub extern "C" fn get_envelope() -> f32 {
    corrector().envelope()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_exports() {
        let length = 512;
        let input = allocate_f32_array(length);
        let output = allocate_f32_array(length);
        unsafe {
            for i in 0..length {
                *input.add(i) = 0.0;
                *output.add(i) = 1.0;
            }
        }

        reset_state();
        set_key(0b1010_1011_0101);
        process_frame(input, output, length, 0.8, 0.5);
        let processed = unsafe { std::slice::from_raw_parts(output, length) };
        assert!(processed.iter().all(|y| *y == 0.0));
        assert_eq!(get_detected_frequency(), 0.0);
        assert_eq!(get_midi_note_number(), 0.0);

        // Ignored
        process_frame(std::ptr::null(), output, length, 0.8, 0.5);

        free_f32_array(input, length);
        free_f32_array(output, length);
    }
}
