//! Statistical primitives for mean-shift change-point detection.
//!
//! This crate provides the small set of pure functions the detector is built on:
//!
//! - **Descriptive statistics**: arithmetic mean and population standard deviation
//! - **CUSUM**: the cumulative sum of deviations from the mean, its range, and the
//!   position of its largest excursion
//!
//! # Modules
//!
//! - [`descriptive`]: Mean, population standard deviation and per-segment summaries
//! - [`cusum`]: Cumulative-sum range and peak location
//!
//! # Examples
//!
//! ## Summarizing a segment
//!
//! ```
//! use meanshift_stats::descriptive::SegmentStats;
//!
//! let stats = SegmentStats::new(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
//! assert_eq!(stats.mean, 5.0);
//! assert_eq!(stats.std_dev, 2.0);
//! ```
//!
//! ## Locating a shift with CUSUM
//!
//! ```
//! use meanshift_stats::cusum::Cusum;
//!
//! let values = [1.0, 1.0, 1.0, 5.0, 5.0, 5.0];
//! let cusum = Cusum::new(3.0, &values);
//! assert_eq!(cusum.peak_index, 2); // last value before the shift
//! assert_eq!(cusum.range, 6.0);
//! ```

pub mod cusum;
pub mod descriptive;
