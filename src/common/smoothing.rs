use micromath::F32Ext;

/// Steps closer than this to the target land on it exactly.
const SETTLE_THRESHOLD: f32 = 1e-6;

/// One-pole exponential smoother, `current += coeff * (target - current)` per step.
#[derive(Clone, Copy, Debug)]
pub struct OnePole {
    current: f32,
    target: f32,
    coeff: f32,
}

impl OnePole {
    /// Creates a smoother reaching ~63% of a step after `ramp_ms` milliseconds.
    pub fn new(initial: f32, ramp_ms: f32, sample_rate: f32) -> Self {
        OnePole {
            current: initial,
            target: initial,
            coeff: ramp_coefficient(ramp_ms, sample_rate),
        }
    }

    /// Creates a smoother with an explicit per step coefficient in [0, 1].
    pub fn with_coefficient(initial: f32, coeff: f32) -> Self {
        OnePole {
            current: initial,
            target: initial,
            coeff: coeff.max(0.0).min(1.0),
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    /// Advances one step and returns the new value.
    #[inline]
    pub fn next(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        if F32Ext::abs(self.target - self.current) < SETTLE_THRESHOLD {
            self.current = self.target;
        }
        self.current
    }

    /// Returns true once the value has reached the target.
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Jumps to `value` immediately.
    pub fn reset(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }
}

fn ramp_coefficient(ramp_ms: f32, sample_rate: f32) -> f32 {
    let samples = (ramp_ms / 1000.0) * sample_rate;
    if samples <= 1.0 {
        return 1.0;
    }
    1.0 - F32Ext::exp(-1.0 / samples)
}
