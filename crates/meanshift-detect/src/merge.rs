//! Second post-processing pass: absorb subtle change points.
//!
//! Every non-subtle change point opens a reported segment that extends over
//! the run of subtle change points following it. Statistics are recomputed
//! over the whole merged range, never aggregated from the pieces.

use crate::{
    Series,
    change::{ChangePoint, Segment, SegmentSummary},
};

/// Builds the merged segment list from the summarized change points.
pub(crate) fn merge(series: &Series, changes: &[ChangePoint]) -> Vec<Segment> {
    changes
        .iter()
        .enumerate()
        .filter(|(_, change)| !change.subtle)
        .map(|(i, change)| {
            let end = changes[i + 1..]
                .iter()
                .find(|next| !next.subtle)
                .map_or(series.len(), |next| next.index);
            Segment {
                index: change.index,
                end,
                confidence: change.confidence,
                summary: SegmentSummary::new(series, change.index..end),
            }
        })
        .collect()
}
