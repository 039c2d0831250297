//! Parallel transform/reduce primitives for the smoke-test binary.

use rayon::prelude::*;

/// Number of single-precision elements the smoke test allocates by default.
pub const DEFAULT_LEN: usize = 100_000_000;

/// Value every element starts from.
const FILL_VALUE: f32 = 1.0;

/// Allocate the input buffer. With the `fault_injection` feature the fill
/// is negated, which drives the reduced sum negative and trips the sanity
/// check downstream.
pub fn fill(len: usize) -> Vec<f32> {
    if cfg!(feature = "fault_injection") {
        vec![-FILL_VALUE; len]
    } else {
        vec![FILL_VALUE; len]
    }
}

/// Double every element in place. Each output element depends only on its
/// own input, so partitioning is left entirely to rayon.
pub fn double_in_place(data: &mut [f32]) {
    data.par_iter_mut().for_each(|x| *x *= 2.0);
}

/// Sum the buffer in parallel. Combination order is unspecified; the result
/// is exact only while partial sums stay within f32 integer range.
pub fn parallel_sum(data: &[f32]) -> f32 {
    data.par_iter().sum()
}

/// Exit code for the sanity check: 0 for a positive sum, 1 for anything
/// else (zero, negative, or NaN).
pub fn sanity_exit_code(sum: f32) -> i32 {
    if sum > 0.0 {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "fault_injection"))]
    #[test]
    fn fill_produces_ones() {
        let data = fill(16);
        assert_eq!(data.len(), 16);
        assert!(data.iter().all(|&x| x == 1.0));
    }

    #[cfg(feature = "fault_injection")]
    #[test]
    fn poisoned_fill_produces_negative_ones() {
        let data = fill(16);
        assert!(data.iter().all(|&x| x == -1.0));
    }

    #[test]
    fn double_in_place_doubles_every_element() {
        let mut data = vec![1.0f32, 2.0, 3.0, -4.0];
        double_in_place(&mut data);
        assert_eq!(data, vec![2.0, 4.0, 6.0, -8.0]);
    }

    #[test]
    fn parallel_sum_of_a_million_ones_is_exact() {
        let data = vec![1.0f32; 1_000_000];
        assert_eq!(parallel_sum(&data), 1_000_000.0);
    }

    #[test]
    fn transform_then_reduce_matches_expected_total() {
        let mut data = vec![1.0f32; 100_000];
        double_in_place(&mut data);
        assert_eq!(parallel_sum(&data), 200_000.0);
    }

    #[test]
    fn sanity_exit_code_flags_non_positive_sums() {
        assert_eq!(sanity_exit_code(200_000_000.0), 0);
        assert_eq!(sanity_exit_code(f32::MIN_POSITIVE), 0);
        assert_eq!(sanity_exit_code(0.0), 1);
        assert_eq!(sanity_exit_code(-1.0), 1);
        assert_eq!(sanity_exit_code(f32::NAN), 1);
    }
}
