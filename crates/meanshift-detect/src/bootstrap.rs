//! Permutation test for the presence of a mean shift.
//!
//! The CUSUM range of a window is compared against the CUSUM ranges of
//! `bootstrap_count` random reorderings of the same values. If the window
//! really contains a shift, its ordered range dominates almost every shuffled
//! one; if it is noise, the ordering carries no information and the original
//! range lands somewhere in the middle.
//!
//! Only the significance is tested. The candidate location is the CUSUM peak
//! of the unshuffled window and never changes.

use meanshift_stats::{
    cusum::{Cusum, cusum_range},
    descriptive,
};
use rand::{Rng, seq::SliceRandom as _};

/// Outcome of one significance test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Significance {
    /// Percentage (0-100) of permutations whose CUSUM range was strictly below the original.
    pub(crate) confidence: f64,
    /// CUSUM peak of the unshuffled window, relative to the window start.
    pub(crate) peak_index: usize,
}

/// Reusable permutation buffer so each test does not allocate a fresh copy.
#[derive(Debug, Default)]
pub(crate) struct Bootstrap {
    scratch: Vec<f64>,
}

impl Bootstrap {
    /// Tests `window` for a mean shift using `bootstrap_count` permutations.
    ///
    /// `window` itself is never reordered; the permutations run on a private copy.
    ///
    /// # Panics
    ///
    /// Panics if `window` is empty.
    pub(crate) fn test<R>(
        &mut self,
        window: &[f64],
        bootstrap_count: usize,
        rng: &mut R,
    ) -> Significance
    where
        R: Rng + ?Sized,
    {
        let mean = descriptive::mean(window).expect("window must not be empty");
        let original = Cusum::new(mean, window);

        self.scratch.clear();
        self.scratch.extend_from_slice(window);

        let mut below = 0_usize;
        for _ in 0..bootstrap_count {
            self.scratch.shuffle(rng);
            if cusum_range(mean, &self.scratch) < original.range {
                below += 1;
            }
        }

        #[expect(clippy::cast_precision_loss)]
        let confidence = 100.0 * below as f64 / bootstrap_count as f64;
        Significance {
            confidence,
            peak_index: original.peak_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_clear_step_is_fully_confident() {
        let window = [[10.0; 20], [100.0; 20]].concat();
        let result = Bootstrap::default().test(&window, 500, &mut rng());
        assert_eq!(result.peak_index, 19);
        // A shuffle reproducing the exact step ordering is astronomically unlikely.
        assert_eq!(result.confidence, 100.0);
    }

    #[test]
    fn test_constant_window_has_zero_confidence() {
        let window = [3.5; 16];
        let result = Bootstrap::default().test(&window, 200, &mut rng());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.peak_index, 0);
    }

    #[test]
    fn test_single_value_window() {
        let result = Bootstrap::default().test(&[42.0], 50, &mut rng());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.peak_index, 0);
    }

    #[test]
    fn test_window_is_not_reordered() {
        let window = vec![1.0, 9.0, 2.0, 8.0, 3.0, 7.0];
        let copy = window.clone();
        let _ = Bootstrap::default().test(&window, 100, &mut rng());
        assert_eq!(window, copy);
    }

    #[test]
    fn test_same_seed_same_confidence() {
        let window = [1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 5.5, 7.0];
        let a = Bootstrap::default().test(&window, 1000, &mut rng());
        let b = Bootstrap::default().test(&window, 1000, &mut rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_confidence_is_a_percentage() {
        let window = [4.0, 1.0, 3.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let result = Bootstrap::default().test(&window, 333, &mut rng());
        assert!((0.0..=100.0).contains(&result.confidence));
    }
}
