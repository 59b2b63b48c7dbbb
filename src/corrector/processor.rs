use alloc::{boxed::Box, vec};

use log::{debug, info, warn};
use micromath::F32Ext;

use super::config::CorrectorConfig;
use super::shifter::DelayLineShifter;
use super::state::CorrectionState;
use crate::common::{freq_to_midi_note, F32ArrayExt};
use crate::error::ConfigResult;
use crate::estimator::PitchEstimator;
use crate::scale::{ScaleMask, Snapper};
use crate::shaping::saturate_in_place;

const MIN_RATIO: f32 = 0.5;
const MAX_RATIO: f32 = 2.0;
/// Ratios closer to 1 than this leave the signal dry.
const RATIO_EPSILON: f32 = 1e-3;
/// A gliding ratio this close to the correction lands on it.
const RATIO_SETTLE_THRESHOLD: f32 = 1e-6;

/// A real time monophonic pitch corrector.
///
/// Every processed block goes through the same steps:
/// 1. The block is appended to the lookback buffer.
/// 2. The pitch is estimated on the block and the `max_lag` samples before it.
/// 3. A voiced pitch is snapped to the nearest enabled scale degree. The pitch
///    ratio glides toward `target_pitch / detected_pitch` at the rate given by
///    `speed`, so a pitch already on the scale needs no glide and stays dry.
/// 4. The input is shifted by that ratio and blended with the dry signal
///    according to `amount`.
/// 5. The result is saturated.
///
/// All buffers are allocated on creation.
pub struct PitchCorrector {
    config: CorrectorConfig,
    snapper: Snapper,
    estimator: PitchEstimator,
    shifter: DelayLineShifter,
    state: CorrectionState,
    analysis_window: Box<[f32]>,
    shifted: Box<[f32]>,
}

impl PitchCorrector {
    /// Creates a corrector with default settings at the given sample rate.
    /// Panics if the sample rate is not positive.
    pub fn new(sample_rate: f32) -> Self {
        let config = CorrectorConfig {
            sample_rate,
            ..Default::default()
        };
        match PitchCorrector::from_config(config) {
            Ok(corrector) => corrector,
            Err(error) => panic!("{}", error),
        }
    }

    pub fn from_config(config: CorrectorConfig) -> ConfigResult<Self> {
        if let Err(error) = config.validate() {
            warn!("Rejected pitch corrector configuration: {}", error);
            return Err(error);
        }

        info!(
            "Pitch corrector at {} Hz, {} sample blocks, lags {}..{}",
            config.sample_rate, config.block_size, config.min_lag, config.max_lag
        );

        Ok(PitchCorrector {
            snapper: config.snapper(),
            estimator: PitchEstimator::from_options(
                config.sample_rate,
                config.min_lag,
                config.max_lag,
                config.power_threshold,
                config.octave_tolerance,
            ),
            shifter: DelayLineShifter::new(config.grain_size),
            state: CorrectionState::new(
                config.lookback_capacity,
                config.envelope_smoothing,
                config.wet_ramp_ms,
                config.sample_rate,
            ),
            analysis_window: vec![0.0; config.analysis_window()].into_boxed_slice(),
            shifted: vec![0.0; config.block_size].into_boxed_slice(),
            config,
        })
    }

    /// Enables the scale degrees set in the low 12 bits of `note_mask`,
    /// bit 0 being C. Higher bits are ignored.
    pub fn set_key(&mut self, note_mask: u32) {
        self.set_scale_mask(ScaleMask::from_bits(note_mask));
    }

    pub fn set_scale_mask(&mut self, scale_mask: ScaleMask) {
        debug!("Scale mask {:012b}", scale_mask.bits());
        self.state.scale_mask = scale_mask;
    }

    /// Clears the lookback buffer and the pitch shifter. The tracked pitch,
    /// the envelope and the scale mask are kept.
    pub fn reset_state(&mut self) {
        debug!("Resetting correction state");
        self.state.reset();
    }

    /// Corrects `input` and writes the result to `output`.
    ///
    /// `amount` blends between the dry (0) and the fully corrected (1) signal.
    /// `speed` is the fraction of the remaining correction applied per block,
    /// 1 meaning instant. Both are clamped to [0, 1].
    ///
    /// Only the first `min(input.len(), output.len())` samples are processed.
    /// Frames longer than the configured block size are processed as a sequence
    /// of blocks.
    ///
    /// Silent input gives silent output on a fresh or reset corrector. Right after
    /// a corrected passage, the shifted tail of that passage fades out over
    /// about `wet_ramp_ms`, so silent blocks may still produce output until then.
    /// Call [reset_state](Self::reset_state) to cut the tail.
    pub fn process_frame(&mut self, input: &[f32], output: &mut [f32], amount: f32, speed: f32) {
        let len = input.len().min(output.len());
        let amount = clamp_unit(amount);
        let speed = clamp_unit(speed);
        let block_size = self.config.block_size;
        for (input_block, output_block) in input[..len]
            .chunks(block_size)
            .zip(output[..len].chunks_mut(block_size))
        {
            self.process_block(input_block, output_block, amount, speed);
        }
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32], amount: f32, speed: f32) {
        let state = &mut self.state;
        state.lookback.push_slice(input);
        state.update_envelope(input.rms_level());

        state.lookback.copy_latest(&mut self.analysis_window);
        let detected = self.estimator.estimate(&self.analysis_window);
        state.detected_pitch = detected;

        let ratio = if amount > 0.0 && self.snapper.is_voiced(detected) {
            let target = self.snapper.snap(detected, state.scale_mask);
            let correction = (target / detected).max(MIN_RATIO).min(MAX_RATIO);
            // The glide starts from the previous ratio, 1 after a bypassed block
            let mut ratio = state.ratio + speed * (correction - state.ratio);
            if F32Ext::abs(correction - ratio) < RATIO_SETTLE_THRESHOLD {
                ratio = correction;
            }
            state.current_pitch = detected * ratio;
            state.target_pitch = target;
            state.is_correcting = true;
            ratio
        } else {
            state.current_pitch = detected;
            state.target_pitch = detected;
            state.is_correcting = false;
            1.0
        };

        let is_shifting = state.is_correcting && F32Ext::abs(ratio - 1.0) > RATIO_EPSILON;
        state.wet.set_target(if is_shifting { 1.0 } else { 0.0 });

        if state.wet.is_settled() && state.wet.value() == 0.0 {
            output.copy_from_slice(input);
        } else {
            let shifted = &mut self.shifted[..input.len()];
            state.phase = self
                .shifter
                .shift(&state.lookback, state.phase, state.ratio, ratio, shifted);
            for ((out, dry), wet_sample) in output.iter_mut().zip(input.iter()).zip(shifted.iter()) {
                let wet = state.wet.next();
                *out = dry + amount * wet * (wet_sample - dry);
            }
        }
        state.ratio = ratio;

        saturate_in_place(output);
    }

    /// The pitch detected in the most recent block, 0 if none was found.
    pub fn detected_frequency(&self) -> f32 {
        self.state.detected_pitch
    }

    /// The MIDI note number of the detected pitch, 0 if none was found.
    pub fn detected_midi_note_number(&self) -> f32 {
        let detected = self.state.detected_pitch;
        if detected > 0.0 {
            freq_to_midi_note(detected)
        } else {
            0.0
        }
    }

    /// The correction target of the most recent block. Equals the detected
    /// pitch when no correction was made.
    pub fn target_frequency(&self) -> f32 {
        self.state.target_pitch
    }

    pub fn current_pitch(&self) -> f32 {
        self.state.current_pitch
    }

    /// The pitch ratio applied at the end of the most recent block.
    pub fn ratio(&self) -> f32 {
        self.state.ratio
    }

    pub fn envelope(&self) -> f32 {
        self.state.envelope()
    }

    pub fn scale_mask(&self) -> ScaleMask {
        self.state.scale_mask
    }

    pub fn state(&self) -> &CorrectionState {
        &self.state
    }

    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value > 0.0 {
        value.min(1.0)
    } else {
        // Also catches NaN
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::shaping::saturate_sample;
    use alloc::vec::Vec;
    use approx::assert_abs_diff_eq;

    const SAMPLE_RATE: f32 = 44100.0;

    fn sine_blocks(frequency: f32, amplitude: f32, block_count: usize) -> Vec<Vec<f32>> {
        let signal: Vec<f32> = (0..block_count * 512)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE;
                amplitude * (2.0 * core::f32::consts::PI * frequency * t).sin()
            })
            .collect();
        signal.chunks(512).map(|chunk| chunk.to_vec()).collect()
    }

    fn run(corrector: &mut PitchCorrector, blocks: &[Vec<f32>], amount: f32, speed: f32) -> Vec<f32> {
        let mut last = vec![0.0; 512];
        for block in blocks.iter() {
            corrector.process_frame(block, &mut last, amount, speed);
        }
        last
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CorrectorConfig {
            block_size: 0,
            ..Default::default()
        };
        assert_eq!(
            PitchCorrector::from_config(config).err(),
            Some(ConfigError::InvalidBlockSize(0))
        );
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_bad_sample_rate() {
        PitchCorrector::new(-1.0);
    }

    #[test]
    fn test_silence_in_silence_out() {
        let mut corrector = PitchCorrector::new(SAMPLE_RATE);
        let input = [0.0; 512];
        let mut output = [1.0; 512];
        for _ in 0..4 {
            corrector.process_frame(&input, &mut output, 1.0, 1.0);
            assert!(output.iter().all(|value| *value == 0.0));
        }
        assert_eq!(corrector.detected_frequency(), 0.0);
        assert_eq!(corrector.envelope(), 0.0);
    }

    #[test]
    fn test_zero_amount_is_saturated_dry_signal() {
        let mut corrector = PitchCorrector::new(SAMPLE_RATE);
        corrector.set_key(0b0000_0000_0001);
        for block in sine_blocks(293.66, 0.5, 6).iter() {
            let mut output = vec![0.0; 512];
            corrector.process_frame(block, &mut output, 0.0, 1.0);
            for (x, y) in block.iter().zip(output.iter()) {
                assert_eq!(*y, saturate_sample(*x));
            }
        }
        // Detection still runs, but the target is the detected pitch
        assert_abs_diff_eq!(corrector.detected_frequency(), 293.66, epsilon = 2.0);
        assert_eq!(corrector.target_frequency(), corrector.detected_frequency());
        assert_eq!(corrector.ratio(), 1.0);
    }

    #[test]
    fn test_off_scale_pitch_is_corrected() {
        let mut corrector = PitchCorrector::new(SAMPLE_RATE);
        corrector.set_key(0b0000_0000_0001);
        let blocks = sine_blocks(293.66, 0.5, 8);
        let output = run(&mut corrector, &blocks, 1.0, 1.0);

        assert_abs_diff_eq!(corrector.detected_frequency(), 293.66, epsilon = 2.0);
        assert_abs_diff_eq!(corrector.target_frequency(), 261.63, epsilon = 0.01);
        assert_abs_diff_eq!(corrector.current_pitch(), 261.63, epsilon = 0.01);
        let expected_ratio = 261.63 / corrector.detected_frequency();
        assert_abs_diff_eq!(corrector.ratio(), expected_ratio, epsilon = 1e-4);
        assert!(corrector.state().wet_gain() > 0.9);

        // The output is no longer the saturated input
        let last = blocks.last().map(|block| block.as_slice()).unwrap_or(&[]);
        let difference: f32 = last
            .iter()
            .zip(output.iter())
            .map(|(x, y)| (saturate_sample(*x) - y).abs())
            .sum();
        assert!(difference > 1.0);
        assert!(output.iter().all(|y| y.is_finite() && y.abs() <= 1.0));
    }

    #[test]
    fn test_speed_glides_toward_target() {
        let mut corrector = PitchCorrector::new(SAMPLE_RATE);
        corrector.set_key(0b0000_0000_0001);
        let blocks = sine_blocks(293.66, 0.5, 4);
        run(&mut corrector, &blocks, 1.0, 0.5);
        let target = corrector.target_frequency();
        let detected = corrector.detected_frequency();
        let current = corrector.current_pitch();
        // Between the sung pitch and the target
        assert!(current > target && current < detected);
    }

    #[test]
    fn test_on_scale_pitch_stays_dry() {
        let mut corrector = PitchCorrector::new(SAMPLE_RATE);
        for block in sine_blocks(440.0, 0.5, 20).iter() {
            let mut output = vec![0.0; 512];
            corrector.process_frame(block, &mut output, 0.8, 0.5);
            assert_eq!(corrector.ratio(), 1.0);
            for (x, y) in block.iter().zip(output.iter()) {
                assert_eq!(*y, saturate_sample(*x));
            }
        }
        assert_eq!(corrector.target_frequency(), corrector.detected_frequency());
        assert_eq!(corrector.current_pitch(), corrector.detected_frequency());
    }

    #[test]
    fn test_correction_glides_back_when_pitch_returns_to_scale() {
        let mut corrector = PitchCorrector::new(SAMPLE_RATE);
        corrector.set_scale_mask(ScaleMask::major(0));
        // C#4 is pulled down to C4
        run(&mut corrector, &sine_blocks(277.18, 0.5, 10), 1.0, 0.5);
        assert!(corrector.ratio() < 0.96);

        // D4 is in the scale, the correction fades away
        let blocks = sine_blocks(293.66, 0.5, 60);
        let output = run(&mut corrector, &blocks, 1.0, 0.5);
        assert_eq!(corrector.ratio(), 1.0);
        let last = &blocks[blocks.len() - 1];
        for (x, y) in last.iter().zip(output.iter()) {
            assert_eq!(*y, saturate_sample(*x));
        }
    }

    #[test]
    fn test_shifted_tail_fades_after_correction() {
        let mut corrector = PitchCorrector::new(SAMPLE_RATE);
        corrector.set_key(0b0000_0000_0001);
        run(&mut corrector, &sine_blocks(293.66, 0.5, 8), 1.0, 1.0);

        let silence = [0.0; 512];
        let mut output = [0.0; 512];
        corrector.process_frame(&silence, &mut output, 1.0, 1.0);
        assert!(output.iter().any(|value| *value != 0.0));
        for _ in 0..4 {
            corrector.process_frame(&silence, &mut output, 1.0, 1.0);
        }
        assert!(output.iter().all(|value| *value == 0.0));

        // Resetting cuts the tail right away
        run(&mut corrector, &sine_blocks(293.66, 0.5, 8), 1.0, 1.0);
        corrector.reset_state();
        corrector.process_frame(&silence, &mut output, 1.0, 1.0);
        assert!(output.iter().all(|value| *value == 0.0));
    }

    #[test]
    fn test_reset_matches_fresh_state() {
        let mut used = PitchCorrector::new(SAMPLE_RATE);
        used.set_key(0b0000_0000_0001);
        run(&mut used, &sine_blocks(293.66, 0.5, 8), 1.0, 1.0);
        used.reset_state();

        let mut fresh = PitchCorrector::new(SAMPLE_RATE);
        fresh.set_key(0b0000_0000_0001);

        let silence = [0.0; 512];
        let mut used_output = [1.0; 512];
        let mut fresh_output = [2.0; 512];
        used.process_frame(&silence, &mut used_output, 1.0, 1.0);
        fresh.process_frame(&silence, &mut fresh_output, 1.0, 1.0);
        assert_eq!(used_output, fresh_output);
        assert_eq!(used.state().lookback().write_cursor(), fresh.state().lookback().write_cursor());
    }

    #[test]
    fn test_frame_lengths() {
        let mut corrector = PitchCorrector::new(SAMPLE_RATE);
        let blocks = sine_blocks(220.0, 0.25, 4);
        let signal: Vec<f32> = blocks.concat();

        // Longer than a block: split into 512 + 512 + 476
        let mut output = vec![0.0; 1500];
        corrector.process_frame(&signal[..1500], &mut output, 0.8, 0.5);
        assert!(output.iter().all(|y| y.is_finite()));
        assert_eq!(corrector.state().lookback().write_cursor(), 1500);

        // Shorter blocks, and an output shorter than the input
        let mut output = vec![7.0; 64];
        corrector.process_frame(&signal[..100], &mut output, 0.8, 0.5);
        assert_eq!(corrector.state().lookback().write_cursor(), 1564);

        // Output longer than the input: the tail is left alone
        let mut output = vec![7.0; 128];
        corrector.process_frame(&signal[..100], &mut output, 0.8, 0.5);
        assert!(output[100..].iter().all(|y| *y == 7.0));

        // Empty frames are a no-op
        corrector.process_frame(&[], &mut [], 0.8, 0.5);
    }

    #[test]
    fn test_set_key_masks_high_bits() {
        let mut corrector = PitchCorrector::new(SAMPLE_RATE);
        assert_eq!(corrector.scale_mask(), ScaleMask::chromatic());
        corrector.set_key(0xF000 | 0b1010_1011_0101);
        assert_eq!(corrector.scale_mask(), ScaleMask::major(0));
    }

    #[test]
    fn test_knobs_are_clamped() {
        assert_eq!(clamp_unit(-1.0), 0.0);
        assert_eq!(clamp_unit(f32::NAN), 0.0);
        assert_eq!(clamp_unit(0.25), 0.25);
        assert_eq!(clamp_unit(3.0), 1.0);
    }
}
