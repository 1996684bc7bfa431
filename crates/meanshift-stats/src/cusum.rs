//! Cumulative sum (CUSUM) of deviations from a mean.
//!
//! For values `x[0..n]` and a reference mean `m`, the CUSUM path is
//!
//! ```text
//! S[0] = 0
//! S[i + 1] = S[i] + (x[i] - m)
//! ```
//!
//! A mean shift inside the slice shows up as a large excursion of the path
//! away from zero. The path's range (`max(S) - min(S)`) measures how large the
//! shift is, and the position of the largest `|S[i + 1]|` is the best single
//! estimate of where it happened.

/// Range and peak location of a CUSUM path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cusum {
    /// `max(S) - min(S)` over all `n + 1` points of the path, including `S[0] = 0`.
    pub range: f64,
    /// Data index `i` (into the values, not the path) where `|S[i + 1]|` is largest.
    ///
    /// Ties keep the first occurrence. `0` when every path point is zero.
    pub peak_index: usize,
}

impl Cusum {
    /// Builds the CUSUM path of `values` around `mean` and returns its range and peak.
    #[must_use]
    pub fn new(mean: f64, values: &[f64]) -> Self {
        let mut sum = 0.0;
        let mut max = 0.0_f64;
        let mut min = 0.0_f64;
        let mut peak = 0.0;
        let mut peak_index = 0;

        for (i, v) in values.iter().enumerate() {
            sum += v - mean;
            max = max.max(sum);
            min = min.min(sum);
            if sum.abs() > peak {
                peak = sum.abs();
                peak_index = i;
            }
        }

        Self {
            range: max - min,
            peak_index,
        }
    }
}

/// Returns only the range of the CUSUM path of `values` around `mean`.
///
/// Equivalent to `Cusum::new(mean, values).range` without tracking the peak.
/// This is the quantity recomputed for every bootstrap permutation.
#[must_use]
pub fn cusum_range(mean: f64, values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut max = 0.0_f64;
    let mut min = 0.0_f64;
    for v in values {
        sum += v - mean;
        max = max.max(sum);
        min = min.min(sum);
    }
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slice() {
        let cusum = Cusum::new(0.0, &[]);
        assert_eq!(cusum.range, 0.0);
        assert_eq!(cusum.peak_index, 0);
    }

    #[test]
    fn test_constant_values_have_zero_range() {
        let values = [4.0; 8];
        let cusum = Cusum::new(4.0, &values);
        assert_eq!(cusum.range, 0.0);
        assert_eq!(cusum.peak_index, 0);
    }

    #[test]
    fn test_upward_shift_peaks_before_shift() {
        // mean = 2.0, path = 0, -1, -2, -3, -2, -1, 0
        let values = [1.0, 1.0, 1.0, 3.0, 3.0, 3.0];
        let cusum = Cusum::new(2.0, &values);
        assert_eq!(cusum.range, 3.0);
        assert_eq!(cusum.peak_index, 2);
    }

    #[test]
    fn test_downward_shift_peaks_before_shift() {
        // mean = 2.0, path = 0, 1, 2, 1, 0
        let values = [3.0, 3.0, 1.0, 1.0];
        let cusum = Cusum::new(2.0, &values);
        assert_eq!(cusum.range, 2.0);
        assert_eq!(cusum.peak_index, 1);
    }

    #[test]
    fn test_range_includes_initial_zero() {
        // mean = 0.0, path = 0, 1, 2 -> min is the initial 0
        let values = [1.0, 1.0];
        let cusum = Cusum::new(0.0, &values);
        assert_eq!(cusum.range, 2.0);
    }

    #[test]
    fn test_tie_keeps_first_peak() {
        // mean = 0.0, path = 0, 1, 0, -1, 0: |1| at index 0 and |-1| at index 2
        let values = [1.0, -1.0, -1.0, 1.0];
        let cusum = Cusum::new(0.0, &values);
        assert_eq!(cusum.peak_index, 0);
        assert_eq!(cusum.range, 2.0);
    }

    #[test]
    fn test_negative_peak_beats_smaller_positive_peak() {
        // mean = 0.0, path = 0, 1, -2, 0
        let values = [1.0, -3.0, 2.0];
        let cusum = Cusum::new(0.0, &values);
        assert_eq!(cusum.peak_index, 1);
        assert_eq!(cusum.range, 3.0);
    }

    #[test]
    fn test_cusum_range_matches_full_cusum() {
        let values = [5.0, 1.0, 4.0, 9.0, 2.0, 6.0];
        let mean = values.iter().sum::<f64>() / 6.0;
        assert_eq!(cusum_range(mean, &values), Cusum::new(mean, &values).range);
    }
}
