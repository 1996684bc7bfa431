/// Returns the arithmetic mean of `values`.
///
/// Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// # use meanshift_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Returns the population standard deviation of `values` around a precomputed `mean`.
///
/// Divides by `N`, not `N - 1`. Returns `0.0` for an empty slice.
///
/// # Examples
///
/// ```
/// # use meanshift_stats::descriptive::std_dev;
/// let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert_eq!(std_dev(&values, 5.0), 2.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Mean and population standard deviation of a contiguous segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStats {
    /// The arithmetic mean of the segment.
    pub mean: f64,
    /// The population standard deviation of the segment.
    pub std_dev: f64,
}

impl SegmentStats {
    /// Computes the statistics of `values`.
    ///
    /// # Returns
    ///
    /// * `Some(SegmentStats)` - if the segment contains at least one value
    /// * `None` - if the segment is empty
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let std_dev = std_dev(values, mean);
        Some(Self { mean, std_dev })
    }
}
