#[derive(Copy, Clone, Debug)]
/// A minimum of the difference function, refined to a fractional lag.
pub struct LagMinimum {
    /// The index into the difference array corresponding to this minimum
    pub lag_index: usize,
    /// The difference value at `lag_index`
    pub value_at_lag_index: f32,
    /// The difference value for this minimum, approximated using parabolic interpolation.
    pub value: f32,
    /// The index of this minimum with a fractional part, approximated using parabolic interpolation.
    pub lag: f32,
}

impl LagMinimum {
    pub(crate) fn new() -> Self {
        LagMinimum {
            lag_index: 0,
            value_at_lag_index: 0.0,
            value: 0.0,
            lag: 0.0,
        }
    }

    pub(crate) fn set(&mut self, difference: &[f32], lag_index: usize) {
        self.lag_index = lag_index;
        let value_at_lag_index = difference[lag_index];
        self.value_at_lag_index = value_at_lag_index;
        self.value = value_at_lag_index;
        self.lag = lag_index as f32;

        // Edges have only one neighbor, keep the whole lag.
        if lag_index == 0 || lag_index + 1 >= difference.len() {
            return;
        }
        let left = difference[lag_index - 1];
        let right = difference[lag_index + 1];

        // Compute coefficients of a parabola ax^2 + bx + c passing through
        // (-1, left), (0, min), (1, right)
        let a = 0.5 * (right - 2.0 * value_at_lag_index + left);
        let b = 0.5 * (right - left);
        let c = value_at_lag_index;
        if a <= 0.0 {
            // Flat or not a minimum
            return;
        }
        // Find the x value where the derivative is zero, i.e where the parabola has its minimum
        let x_min = (-b / (2.0 * a)).max(-0.5).min(0.5);
        self.value = a * x_min * x_min + b * x_min + c;
        self.lag = (lag_index as f32) + x_min;
    }
}
