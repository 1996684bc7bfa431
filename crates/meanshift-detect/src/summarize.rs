//! First post-processing pass: per-segment statistics and subtlety flags.
//!
//! Every adjacent pair of sorted boundaries delimits one segment. Each segment
//! after the first is compared with its parent: the previous segment, or, if
//! the previous segment was itself subtle, that segment's parent. Comparing
//! against the resolved parent keeps a run of small steps from drifting past
//! the tolerance one step at a time.

use tracing::debug;

use crate::{
    Series,
    change::{Boundary, ChangePoint, SegmentSummary},
};

/// Summarizes the segments between sorted `boundaries` and flags subtle ones.
///
/// `boundaries` must be sorted by index, unique, start at `0` and end at
/// `series.len()`. Returns one change point per segment.
pub(crate) fn summarize(
    series: &Series,
    boundaries: &[Boundary],
    change_tolerance: u32,
) -> Vec<ChangePoint> {
    let mut changes: Vec<ChangePoint> =
        Vec::with_capacity(boundaries.len().saturating_sub(1));

    for (i, pair) in boundaries.windows(2).enumerate() {
        let (start, end) = (pair[0], pair[1]);
        let summary = SegmentSummary::new(series, start.index..end.index);
        let mut change = ChangePoint {
            index: start.index,
            confidence: start.confidence,
            summary,
            subtle: false,
            parent: None,
        };

        if i > 0 {
            let parent = resolve_parent(&changes, i - 1);
            let parent_avg = changes[parent].summary.avg;
            if is_subtle(change.summary.avg, parent_avg, change_tolerance) {
                debug!(
                    index = change.index,
                    avg = change.summary.avg,
                    parent_avg,
                    "subtle change point"
                );
                change.subtle = true;
                change.parent = Some(parent);
            }
        }
        changes.push(change);
    }

    changes
}

/// Follows parent links from `i` to the first non-subtle change point.
fn resolve_parent(changes: &[ChangePoint], mut i: usize) -> usize {
    while let Some(parent) = changes[i].parent {
        debug_assert!(parent < i, "parent links must point backwards");
        i = parent;
    }
    debug_assert!(!changes[i].subtle);
    i
}

/// Percentage difference between two segment averages.
///
/// Computed from the ratio of the smaller to the larger average, with a
/// `+0.5` rounding bias: `|100 - (ratio * 100 + 0.5)|`. Equal averages give
/// a ratio of exactly 1. Returns `None` when the ratio is not finite, which
/// happens when the larger average is zero.
#[must_use]
pub(crate) fn shift_percent(avg: f64, parent_avg: f64) -> Option<f64> {
    #[expect(clippy::float_cmp)]
    let ratio = if avg == parent_avg {
        1.0
    } else {
        avg.min(parent_avg) / avg.max(parent_avg)
    };
    ratio
        .is_finite()
        .then(|| (100.0 - (ratio * 100.0 + 0.5)).abs())
}

/// A shift is subtle when its whole-percent difference is within tolerance.
fn is_subtle(avg: f64, parent_avg: f64, change_tolerance: u32) -> bool {
    shift_percent(avg, parent_avg)
        .is_some_and(|delta| delta.trunc() <= f64::from(change_tolerance))
}
