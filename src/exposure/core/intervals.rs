//! Livetime intervals clipped to a light-curve axis.
//!
//! Purpose
//! -------
//! Turn raw `(event time, prior)` pairs into the livetime intervals
//! `[event - prior, event)` that the binner apportions, expressed in the
//! shifted frame of a [`TimeBins`] axis, with the observable-range filter,
//! edge clamping, and start/end bin assignment already applied.
//!
//! Key behaviors
//! -------------
//! - Drop intervals that cannot touch the axis: the event falls at or before
//!   the first edge, or the livetime starts at or after the last edge.
//! - Clamp a start that precedes the first edge to `first + edge_epsilon`
//!   and an event beyond the last edge to `last - edge_epsilon`, shrinking
//!   the prior so only the observed portion counts.
//! - Assign start and end bins with the right-side search of
//!   [`TimeBins::bin_of`].
//!
//! Invariants & assumptions
//! ------------------------
//! - After construction, every kept interval satisfies
//!   `first_edge <= start <= end` and `start_bin <= end_bin < N`.
//! - Clamping never inverts an interval: the clamped start is capped at the
//!   event and the clamped event is floored at the start.
use tracing::debug;

use crate::exposure::core::{bins::TimeBins, options::LivetimeOptions};

/// LivetimeIntervals — clipped intervals with their bin assignment.
///
/// Fields are parallel arrays indexed by kept interval; `event_index` maps
/// each back to its position in the caller's event stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LivetimeIntervals {
    pub event_index: Vec<usize>,
    pub starts: Vec<f64>,
    pub ends: Vec<f64>,
    pub priors: Vec<f64>,
    pub start_bins: Vec<usize>,
    pub end_bins: Vec<usize>,
    /// Intervals whose start was moved onto the first edge.
    pub n_clipped_start: usize,
    /// Intervals whose event was moved onto the last edge.
    pub n_clipped_end: usize,
}

impl LivetimeIntervals {
    /// Build clipped intervals for `events`/`priors` against `bins`.
    ///
    /// Inputs are expected to have passed
    /// [`validate_events`](crate::exposure::validation::validate_events).
    pub fn build(
        bins: &TimeBins, events: &[f64], priors: &[f64], opts: &LivetimeOptions,
    ) -> LivetimeIntervals {
        let first = bins.first_edge();
        let last = bins.last_edge();
        let eps = opts.edge_epsilon;
        let mut out = LivetimeIntervals::default();

        for (index, (&event, &prior)) in events.iter().zip(priors).enumerate() {
            let mut end = event - bins.origin();
            let mut start = end - prior;
            if end <= first || start >= last {
                continue;
            }

            if start < first {
                start = (first + eps).min(end);
                out.n_clipped_start += 1;
            }
            if end > last {
                end = (last - eps).max(start);
                out.n_clipped_end += 1;
            }

            // Both lookups succeed once start >= first.
            let (Some(start_bin), Some(end_bin)) = (bins.bin_of(start), bins.bin_of(end)) else {
                continue;
            };

            out.event_index.push(index);
            out.starts.push(start);
            out.ends.push(end);
            out.priors.push(end - start);
            out.start_bins.push(start_bin);
            out.end_bins.push(end_bin);
        }

        debug!(
            n_events = events.len(),
            n_kept = out.len(),
            n_clipped_start = out.n_clipped_start,
            n_clipped_end = out.n_clipped_end,
            "built livetime intervals"
        );
        out
    }

    pub fn len(&self) -> usize {
        self.event_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.event_index.is_empty()
    }

    /// Number of bin boundaries crossed by interval `k`.
    pub fn span(&self, k: usize) -> usize {
        self.end_bins[k] - self.start_bins[k]
    }
}
