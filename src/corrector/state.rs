use crate::common::{OnePole, RingBuffer};
use crate::scale::ScaleMask;

/// Everything a [PitchCorrector](super::PitchCorrector) carries from one block to the next.
pub struct CorrectionState {
    /// The most recent input samples, newest last.
    pub(crate) lookback: RingBuffer,
    /// The position of the shifter's first tap within its grain, in [0, 1).
    pub(crate) phase: f32,
    /// The pitch ratio applied at the end of the previous block. It glides
    /// toward `target_pitch / detected_pitch` while correcting.
    pub(crate) ratio: f32,
    /// The detected pitch times `ratio`, in Hz.
    pub(crate) current_pitch: f32,
    pub(crate) target_pitch: f32,
    pub(crate) detected_pitch: f32,
    /// True if the previous block was corrected.
    pub(crate) is_correcting: bool,
    pub(crate) envelope: OnePole,
    /// Gain of the shifted signal relative to the dry signal.
    pub(crate) wet: OnePole,
    pub(crate) scale_mask: ScaleMask,
}

impl CorrectionState {
    pub fn new(
        lookback_capacity: usize,
        envelope_smoothing: f32,
        wet_ramp_ms: f32,
        sample_rate: f32,
    ) -> Self {
        CorrectionState {
            lookback: RingBuffer::new(lookback_capacity),
            phase: 0.0,
            ratio: 1.0,
            current_pitch: 0.0,
            target_pitch: 0.0,
            detected_pitch: 0.0,
            is_correcting: false,
            envelope: OnePole::with_coefficient(0.0, envelope_smoothing),
            wet: OnePole::new(0.0, wet_ramp_ms, sample_rate),
            scale_mask: ScaleMask::default(),
        }
    }

    /// Clears the lookback buffer and the shifter. Pitch tracking, the envelope
    /// and the scale mask are kept.
    pub fn reset(&mut self) {
        self.lookback.clear();
        self.phase = 0.0;
        self.ratio = 1.0;
        self.wet.reset(0.0);
    }

    pub fn lookback(&self) -> &RingBuffer {
        &self.lookback
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn current_pitch(&self) -> f32 {
        self.current_pitch
    }

    pub fn target_pitch(&self) -> f32 {
        self.target_pitch
    }

    pub fn detected_pitch(&self) -> f32 {
        self.detected_pitch
    }

    /// The smoothed block level, in [0, 1].
    pub fn envelope(&self) -> f32 {
        self.envelope.value()
    }

    pub fn wet_gain(&self) -> f32 {
        self.wet.value()
    }

    pub fn scale_mask(&self) -> ScaleMask {
        self.scale_mask
    }

    /// Feeds the level of a new block to the envelope follower.
    pub(crate) fn update_envelope(&mut self, level: f32) {
        let level = if level.is_finite() {
            level.max(0.0).min(1.0)
        } else {
            0.0
        };
        self.envelope.set_target(level);
        self.envelope.next();
    }
}
