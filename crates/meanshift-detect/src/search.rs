//! Binary-segmentation search for mean shifts.
//!
//! Starting from the whole series, each window is tested with the bootstrap
//! test. When the test is significant, a change point is recorded at the CUSUM
//! peak and both halves on either side of it are searched again, so that
//! weaker shifts inside an already split region are still found. A window
//! whose test fails is not split any further.
//!
//! Windows are index ranges into the original series; no data is copied
//! between steps. Pending windows are kept on an explicit stack and visited
//! depth first, left half before right half, so the random stream is consumed
//! in the same order a recursive walk would consume it.

use rand::Rng;
use tracing::{debug, debug_span, trace};

use crate::{DetectorConfig, bootstrap::Bootstrap, change::Boundary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// A window still to be examined: one side of `split` inside `start..end`.
#[derive(Debug, Clone, Copy)]
struct PendingWindow {
    start: usize,
    end: usize,
    /// Split offset relative to `start`.
    split: usize,
    direction: Direction,
}

impl PendingWindow {
    /// Absolute bounds of the half to examine, or `None` if that half is empty.
    fn half(self) -> Option<(usize, usize)> {
        let Self {
            start,
            end,
            split,
            direction,
        } = self;
        match direction {
            Direction::Left if split > 0 => Some((start, start + split)),
            Direction::Right if split < end - start => Some((start + split, end)),
            _ => None,
        }
    }
}

/// All state of one search, owned by a single analysis.
struct SearchContext<'a, R: ?Sized> {
    values: &'a [f64],
    config: &'a DetectorConfig,
    rng: &'a mut R,
    bootstrap: Bootstrap,
    accepted: Vec<Boundary>,
}

impl<R> SearchContext<'_, R>
where
    R: Rng + ?Sized,
{
    fn run(mut self) -> Vec<Boundary> {
        let n = self.values.len();
        let mut pending = vec![PendingWindow {
            start: 0,
            end: n,
            split: n,
            direction: Direction::Left,
        }];

        while let Some(window) = pending.pop() {
            let Some((start, end)) = window.half() else {
                continue;
            };
            let Some(split) = self.examine(start, end) else {
                continue;
            };
            pending.push(PendingWindow {
                start,
                end,
                split,
                direction: Direction::Right,
            });
            pending.push(PendingWindow {
                start,
                end,
                split,
                direction: Direction::Left,
            });
        }

        self.accepted
    }

    /// Tests `values[start..end]` and records a change point if it is significant.
    ///
    /// Returns the accepted split offset relative to `start`.
    fn examine(&mut self, start: usize, end: usize) -> Option<usize> {
        let window = &self.values[start..end];
        let significance = self
            .bootstrap
            .test(window, self.config.bootstrap_count, self.rng);

        if significance.confidence < self.config.min_confidence {
            trace!(
                start,
                end,
                confidence = significance.confidence,
                "no significant shift"
            );
            return None;
        }

        let split = significance.peak_index + 1;
        if split >= window.len() {
            // peak on the last element: no interior split exists
            trace!(start, end, "split falls on window end");
            return None;
        }

        let index = start + split;
        debug!(
            index,
            start,
            end,
            confidence = significance.confidence,
            "accepted change point"
        );
        self.accepted.push(Boundary {
            index,
            confidence: significance.confidence,
        });
        Some(split)
    }
}

/// Searches `values` for significant mean shifts.
///
/// Returns the accepted change points in discovery order, which is not
/// index order.
pub(crate) fn find_boundaries<R>(
    values: &[f64],
    config: &DetectorConfig,
    rng: &mut R,
) -> Vec<Boundary>
where
    R: Rng + ?Sized,
{
    let _span = debug_span!("search", len = values.len()).entered();
    SearchContext {
        values,
        config,
        rng,
        bootstrap: Bootstrap::default(),
        accepted: Vec::new(),
    }
    .run()
}
