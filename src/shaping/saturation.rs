use wide::f32x4;

/// The number of samples processed per vector step.
pub const LANES: usize = 4;

const ONE_THIRD: f32 = 1.0 / 3.0;

/// The cubic soft clipper `x - x^3 / 3` for a single sample.
#[inline]
pub fn saturate_sample(x: f32) -> f32 {
    x - x * x * x * ONE_THIRD
}

/// Applies [saturate_sample] to every sample of `input`, writing to `output`.
///
/// Groups of four samples go through `f32x4` lanes, the trailing
/// `len % 4` samples through the scalar function. Both paths perform the same
/// operations in the same order, so their results are identical. Only the
/// first `min(input.len(), output.len())` samples are processed.
pub fn saturate(input: &[f32], output: &mut [f32]) {
    let len = input.len().min(output.len());
    let input = &input[..len];
    let output = &mut output[..len];

    let third = f32x4::splat(ONE_THIRD);
    let mut input_chunks = input.chunks_exact(LANES);
    let mut output_chunks = output.chunks_exact_mut(LANES);
    for (src, dst) in (&mut input_chunks).zip(&mut output_chunks) {
        let x = f32x4::from([src[0], src[1], src[2], src[3]]);
        let y = x - x * x * x * third;
        dst.copy_from_slice(&y.to_array());
    }

    for (src, dst) in input_chunks
        .remainder()
        .iter()
        .zip(output_chunks.into_remainder().iter_mut())
    {
        *dst = saturate_sample(*src);
    }
}

/// In place version of [saturate].
pub fn saturate_in_place(buffer: &mut [f32]) {
    let third = f32x4::splat(ONE_THIRD);
    let mut chunks = buffer.chunks_exact_mut(LANES);
    for chunk in &mut chunks {
        let x = f32x4::from([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let y = x - x * x * x * third;
        chunk.copy_from_slice(&y.to_array());
    }
    for sample in chunks.into_remainder().iter_mut() {
        *sample = saturate_sample(*sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use approx::assert_abs_diff_eq;

    fn test_signal(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f32;
                (0.37 * t).sin() * (1.0 + 0.1 * t)
            })
            .collect()
    }

    #[test]
    fn test_matches_formula() {
        let input = test_signal(37);
        let mut output = vec![0.0; input.len()];
        saturate(&input, &mut output);
        for (x, y) in input.iter().zip(output.iter()) {
            let expected = x - x * x * x / 3.0;
            assert_abs_diff_eq!(*y, expected, epsilon = 1e-6 * (1.0 + expected.abs()));
        }
    }

    #[test]
    fn test_vector_and_scalar_paths_agree() {
        // Lengths covering empty, remainder only, exact multiples and every remainder size
        for len in 0..=13 {
            let input = test_signal(len);
            let mut output = vec![f32::NAN; len];
            saturate(&input, &mut output);
            for (x, y) in input.iter().zip(output.iter()) {
                assert_eq!(*y, saturate_sample(*x));
            }

            let mut in_place = input.clone();
            saturate_in_place(&mut in_place);
            assert_eq!(in_place, output);
        }
    }

    #[test]
    fn test_shape() {
        assert_eq!(saturate_sample(0.0), 0.0);
        assert_abs_diff_eq!(saturate_sample(1.0), 2.0 / 3.0, epsilon = 1e-7);
        assert_eq!(saturate_sample(-0.5), -saturate_sample(0.5));
        // Close to linear for small inputs
        assert_abs_diff_eq!(saturate_sample(0.01), 0.01, epsilon = 1e-6);
    }

    #[test]
    fn test_mismatched_lengths_stay_in_bounds() {
        let input = [0.5_f32; 7];
        let mut output = [9.0_f32; 5];
        saturate(&input, &mut output);
        assert!(output.iter().all(|y| *y == saturate_sample(0.5)));

        let input = [0.5_f32; 3];
        let mut output = [9.0_f32; 6];
        saturate(&input, &mut output);
        assert_eq!(&output[3..], &[9.0, 9.0, 9.0]);
    }
}
