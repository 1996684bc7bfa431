use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::{
    AnalysisSeed, ConfigError, DetectorConfig, Series,
    change::{Boundary, ChangePoint, Segment},
    merge, search, summarize,
};

/// Mean-shift change-point detector with a validated configuration.
///
/// A detector holds no per-run state; every call to [`Self::detect`] builds its
/// own working set, so one detector can analyze any number of series.
///
/// # Example
///
/// ```
/// use meanshift_detect::{AnalysisSeed, Detector, DetectorConfig, Series};
///
/// let values = [[10.0; 50], [100.0; 50]].concat();
/// let series = Series::from_values(values).unwrap();
/// let detector = Detector::new(DetectorConfig {
///     bootstrap_count: 1000,
///     ..DetectorConfig::default()
/// })
/// .unwrap();
///
/// let analysis = detector.detect(&series, AnalysisSeed::from_bytes([7; 16]));
/// assert_eq!(analysis.change_count(), 2);
/// assert_eq!(analysis.changes()[1].index, 50);
/// assert_eq!(analysis.changes()[1].confidence, 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Creates a detector, rejecting invalid configurations.
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Analyzes `series` with permutations drawn from a generator seeded by `seed`.
    ///
    /// The result is fully determined by the series, the configuration, and the seed.
    #[must_use]
    pub fn detect<'a>(&self, series: &'a Series, seed: AnalysisSeed) -> ChangeAnalysis<'a> {
        self.detect_with_rng(series, &mut seed.rng())
    }

    /// Like [`Self::detect`], but draws permutations from a caller-supplied generator.
    #[must_use]
    pub fn detect_with_rng<'a, R>(&self, series: &'a Series, rng: &mut R) -> ChangeAnalysis<'a>
    where
        R: Rng + ?Sized,
    {
        if series.is_empty() {
            return ChangeAnalysis {
                series,
                changes: Vec::new(),
                segments: Vec::new(),
            };
        }

        let n = series.len();
        let mut boundaries = vec![Boundary::sentinel(0), Boundary::sentinel(n)];
        boundaries.extend(search::find_boundaries(series.values(), &self.config, rng));
        // discovery order interleaves left and right halves
        boundaries.sort_by_key(|b| b.index);

        let changes = summarize::summarize(series, &boundaries, self.config.change_tolerance);
        let segments = merge::merge(series, &changes);

        info!(
            len = n,
            detected = boundaries.len() - 2,
            subtle = changes.iter().filter(|c| c.subtle).count(),
            segments = segments.len(),
            "analysis complete"
        );

        ChangeAnalysis {
            series,
            changes,
            segments,
        }
    }
}

/// Result of one analysis.
///
/// Holds both the full change list, with subtle change points flagged, and
/// the merged segment list that is the primary result.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeAnalysis<'a> {
    #[serde(skip)]
    series: &'a Series,
    changes: Vec<ChangePoint>,
    segments: Vec<Segment>,
}

impl<'a> ChangeAnalysis<'a> {
    /// The analyzed series.
    #[must_use]
    pub fn series(&self) -> &'a Series {
        self.series
    }

    /// All change points in index order, including subtle ones.
    ///
    /// The first entry always starts at index `0`. Empty for an empty series.
    #[must_use]
    pub fn changes(&self) -> &[ChangePoint] {
        &self.changes
    }

    /// Reported segments after subtle change points have been merged away.
    ///
    /// Together the segments tile the series without gaps or overlaps.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of entries in [`Self::changes`].
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }

    /// Values of the segment that starts at change point `i`.
    #[must_use]
    pub fn change_values(&self, i: usize) -> Option<&'a [f64]> {
        let change = self.changes.get(i)?;
        self.series.values_in(change.summary.range())
    }

    /// Labels of the segment that starts at change point `i`.
    #[must_use]
    pub fn change_labels(&self, i: usize) -> Option<&'a [String]> {
        let change = self.changes.get(i)?;
        self.series.labels_in(change.summary.range())
    }

    /// Values of merged segment `i`.
    #[must_use]
    pub fn segment_values(&self, i: usize) -> Option<&'a [f64]> {
        let segment = self.segments.get(i)?;
        self.series.values_in(segment.index..segment.end)
    }

    /// Labels of merged segment `i`.
    #[must_use]
    pub fn segment_labels(&self, i: usize) -> Option<&'a [String]> {
        let segment = self.segments.get(i)?;
        self.series.labels_in(segment.index..segment.end)
    }
}
