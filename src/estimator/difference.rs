/// Returns the largest lag (exclusive) and the overlap length to use for a window of
/// `window_size` samples, or `None` if the lag range is empty.
///
/// Windows longer than `max_lag` keep the full lag range and an overlap of
/// `window_size - max_lag`, so the cost per lag is the same for every lag.
/// Shorter windows search lags below `window_size / 2` instead of reading past the end.
pub fn lag_range(window_size: usize, min_lag: usize, max_lag: usize) -> Option<(usize, usize)> {
    let effective_max_lag = if window_size > max_lag {
        max_lag
    } else {
        window_size / 2
    };
    if effective_max_lag <= min_lag {
        return None;
    }
    Some((effective_max_lag, window_size - effective_max_lag))
}

/// Computes the squared difference function
///
/// > d(τ) = sum_{i=0}^{overlap-1} (x_i - x_{i+τ})^2
///
/// for the lags `min_lag..min_lag + result.len()`, writing d(min_lag + k) to `result[k]`.
pub fn difference_function(window: &[f32], min_lag: usize, overlap: usize, result: &mut [f32]) {
    if min_lag + result.len() + overlap > window.len() + 1 {
        panic!(
            "Difference function for {} lags from {} with overlap {} does not fit a window of {}",
            result.len(),
            min_lag,
            overlap,
            window.len()
        )
    }

    let head = &window[..overlap];
    for (index, value) in result.iter_mut().enumerate() {
        let lag = min_lag + index;
        let mut sum: f32 = 0.0;
        for (x, x_lagged) in head.iter().zip(window[lag..lag + overlap].iter()) {
            let delta = x - x_lagged;
            sum += delta * delta;
        }
        *value = sum;
    }
}

/// Returns the index of the smallest value. The scan starts from an infinite
/// sentinel and only strictly smaller values replace the current best, so ties
/// resolve to the smallest index. Returns `None` if nothing beats the sentinel,
/// i.e for an empty slice or one containing only NaN or infinite values.
pub fn global_minimum(difference: &[f32]) -> Option<usize> {
    let mut min_value = f32::INFINITY;
    let mut min_index = None;
    for (index, value) in difference.iter().enumerate() {
        if *value < min_value {
            min_value = *value;
            min_index = Some(index);
        }
    }
    min_index
}

/// Returns the index of the first interior local minimum whose value does not exceed
/// `threshold`, or `fallback` if there is none.
pub fn first_minimum_below(difference: &[f32], threshold: f32, fallback: usize) -> usize {
    let len = difference.len();
    for index in 1..len {
        let value = difference[index];
        if value > threshold {
            continue;
        }
        let is_left_lower = value <= difference[index - 1];
        let is_right_lower = index + 1 == len || value <= difference[index + 1];
        if is_left_lower && is_right_lower {
            return index;
        }
    }
    fallback
}
