//! Mean-shift change-point detection for univariate series.
//!
//! This crate finds statistically significant shifts in the mean of an ordered
//! series and summarizes the series as a sequence of stable segments.
//!
//! # Overview
//!
//! An analysis runs in four steps:
//!
//! 1. **Search**: binary segmentation driven by the CUSUM statistic. Each window
//!    is split at its CUSUM peak if a bootstrap permutation test finds the
//!    shift significant, then both halves are searched again.
//! 2. **Sort**: change points are put in index order, bounded by the start of
//!    the series and a one-past-the-end terminator.
//! 3. **Summarize**: every segment gets its mean, standard deviation and
//!    boundaries. Segments whose mean is within the configured tolerance of
//!    their parent's mean are flagged as subtle.
//! 4. **Merge**: subtle change points are absorbed into the preceding
//!    non-subtle segment, and statistics are recomputed over the merged range.
//!
//! # Reproducibility
//!
//! The permutation test is randomized. Every analysis takes an explicit
//! [`AnalysisSeed`] (or any [`rand::Rng`]), so the same input always yields
//! the same change points.
//!
//! # Example
//!
//! ```
//! use meanshift_detect::{AnalysisSeed, Detector, DetectorConfig, Series};
//!
//! let values = [[5.0; 30], [20.0; 30], [21.0; 30]].concat();
//! let series = Series::from_values(values).unwrap();
//! let detector = Detector::new(DetectorConfig {
//!     bootstrap_count: 1000,
//!     ..DetectorConfig::default()
//! })
//! .unwrap();
//!
//! let analysis = detector.detect(&series, AnalysisSeed::from_bytes([1; 16]));
//! for segment in analysis.segments() {
//!     println!(
//!         "lines {}..={}: avg {:.2}",
//!         segment.summary.start_line, segment.summary.end_line, segment.summary.avg
//!     );
//! }
//! ```

pub use self::{
    change::{ChangePoint, Segment, SegmentSummary},
    config::{ConfigError, DetectorConfig},
    detector::{ChangeAnalysis, Detector},
    seed::{AnalysisSeed, ParseSeedError},
    series::{Series, SeriesError},
};

pub mod config;

mod bootstrap;
mod change;
mod detector;
mod merge;
mod search;
mod seed;
mod series;
mod summarize;
