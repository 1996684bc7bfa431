use std::ops::Range;

use meanshift_stats::descriptive::SegmentStats;
use serde::{Deserialize, Serialize};

use crate::Series;

/// Statistics and boundaries of one contiguous segment `[index, end)` of a series.
///
/// Line numbers are 1-based and inclusive, so a segment covering data
/// positions `5..9` reports lines `6 -> 9`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    pub avg: f64,
    pub stdev: f64,
    pub start_line: usize,
    pub end_line: usize,
    pub start_label: String,
    pub end_label: String,
    pub start_value: f64,
    pub end_value: f64,
}

impl SegmentSummary {
    /// Summarizes `series[range]`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty or out of bounds. Callers only build
    /// summaries for segments between two distinct sorted boundaries.
    #[must_use]
    pub(crate) fn new(series: &Series, range: Range<usize>) -> Self {
        let values = &series.values()[range.clone()];
        let labels = &series.labels()[range.clone()];
        let stats = SegmentStats::new(values).expect("segment must not be empty");
        Self {
            avg: stats.mean,
            stdev: stats.std_dev,
            start_line: range.start + 1,
            end_line: range.end,
            start_label: labels[0].clone(),
            end_label: labels[labels.len() - 1].clone(),
            start_value: values[0],
            end_value: values[values.len() - 1],
        }
    }

    /// Number of data points in the segment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_line + 1 - self.start_line
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Data positions covered by the segment.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start_line - 1..self.end_line
    }
}

/// A detected change point and the segment that starts at it.
///
/// The first change point of an analysis always has `index == 0` and
/// `confidence == 0.0`: it marks the start of the series rather than a
/// detected shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePoint {
    /// Position in the series where the segment begins.
    pub index: usize,
    /// Bootstrap confidence (0-100) that a mean shift happens here.
    pub confidence: f64,
    #[serde(flatten)]
    pub summary: SegmentSummary,
    /// Whether the shift is within tolerance of the parent segment's mean.
    pub subtle: bool,
    /// For subtle change points, the position in the change list of the
    /// non-subtle change point this one is absorbed into.
    pub parent: Option<usize>,
}

/// A reported segment after subtle change points have been merged away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Position in the series where the segment begins.
    pub index: usize,
    /// One past the last position of the segment.
    pub end: usize,
    /// Confidence of the change point that opened the segment.
    pub confidence: f64,
    #[serde(flatten)]
    pub summary: SegmentSummary,
}

/// A change-point candidate produced by the search, before summarization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Boundary {
    pub(crate) index: usize,
    pub(crate) confidence: f64,
}

impl Boundary {
    pub(crate) const fn sentinel(index: usize) -> Self {
        Self {
            index,
            confidence: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_bounds() {
        let series = Series::new(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            ["a", "b", "c", "d", "e"].map(str::to_owned).to_vec(),
        )
        .unwrap();
        let summary = SegmentSummary::new(&series, 1..4);
        assert_eq!(summary.start_line, 2);
        assert_eq!(summary.end_line, 4);
        assert_eq!(summary.start_label, "b");
        assert_eq!(summary.end_label, "d");
        assert_eq!(summary.start_value, 2.0);
        assert_eq!(summary.end_value, 4.0);
        assert_eq!(summary.avg, 3.0);
        assert_eq!(summary.len(), 3);
        assert_eq!(summary.range(), 1..4);
    }

    #[test]
    fn test_change_point_serializes_flat() {
        let series = Series::from_values(vec![2.0, 4.0]).unwrap();
        let change = ChangePoint {
            index: 0,
            confidence: 0.0,
            summary: SegmentSummary::new(&series, 0..2),
            subtle: false,
            parent: None,
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["avg"], 3.0);
        assert_eq!(json["end_line"], 2);
        assert_eq!(json["parent"], serde_json::Value::Null);
    }
}
