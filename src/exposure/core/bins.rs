//! Bin geometry for light-curve time axes.
//!
//! Purpose
//! -------
//! Turn a sequence of bin centers plus widths into the `N + 1` bin edges used
//! by the livetime binner, expressed in a time frame shifted by a reference
//! origin so that long mission-elapsed-time values keep their precision.
//!
//! Key behaviors
//! -------------
//! - [`BinWidths`] models a uniform or per-bin width; a missing width is
//!   inferred as the median spacing of the bin centers.
//! - [`TimeBins`] stores shifted edges and widths and answers the
//!   right-side search `bin_of(t)`: the bin whose left edge is the greatest
//!   left edge `<= t`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `edges.len() == widths.len() + 1` and edges are non-decreasing.
//! - Edge `i < N` is `center[i] - dt[i] / 2`; edge `N` is
//!   `center[N-1] + dt[N-1] / 2`.
//! - The axis is assumed contiguous: bin `i`'s right edge meets bin
//!   `i + 1`'s left edge. Only decreasing edges are rejected, so an axis
//!   whose bins partially overlap (centers `[0.5, 1.0]`, `dt = 1`) is
//!   accepted and credits livetime by left edge alone. A gapped axis
//!   (centers `[0.5, 2.5]`, `dt = 1`) credits the gap to the bin before it
//!   and typically surfaces as `LivetimeExceedsWidth`; the cause is the
//!   caller's axis even though that error is classed as internal.
use ndarray::Array1;

use crate::exposure::{
    errors::{ExposureError, ExposureResult},
    validation::{validate_bin_widths, validate_length, validate_time_axis},
};

/// Width of the bins of a light-curve time axis.
#[derive(Debug, Clone, PartialEq)]
pub enum BinWidths {
    /// Same width for every bin.
    Uniform(f64),
    /// One width per bin; length must match the number of bins.
    PerBin(Array1<f64>),
}

impl BinWidths {
    /// Median of the successive differences of `times`.
    ///
    /// Errors
    /// ------
    /// - `ExposureError::CannotInferWidth` when fewer than two centers are
    ///   available.
    pub fn infer(times: &[f64]) -> ExposureResult<f64> {
        if times.len() < 2 {
            return Err(ExposureError::CannotInferWidth { n_bins: times.len() });
        }
        let mut diffs: Vec<f64> = times.windows(2).map(|w| w[1] - w[0]).collect();
        diffs.sort_by(f64::total_cmp);
        let mid = diffs.len() / 2;
        let median = if diffs.len() % 2 == 0 { 0.5 * (diffs[mid - 1] + diffs[mid]) } else { diffs[mid] };
        Ok(median)
    }

    /// Broadcast to one validated width per bin, inferring when `dt` is `None`.
    pub fn resolve(dt: Option<&BinWidths>, times: &[f64]) -> ExposureResult<Array1<f64>> {
        let widths = match dt {
            Some(BinWidths::Uniform(w)) => Array1::from_elem(times.len(), *w),
            Some(BinWidths::PerBin(ws)) => {
                validate_length("dt", times.len(), ws.len())?;
                ws.clone()
            }
            None => Array1::from_elem(times.len(), BinWidths::infer(times)?),
        };
        validate_bin_widths(&widths.to_vec())?;
        Ok(widths)
    }
}

impl From<f64> for BinWidths {
    fn from(value: f64) -> Self {
        BinWidths::Uniform(value)
    }
}

impl From<Vec<f64>> for BinWidths {
    fn from(value: Vec<f64>) -> Self {
        BinWidths::PerBin(Array1::from(value))
    }
}

/// TimeBins — validated bin edges in a shifted time frame.
///
/// Fields
/// ------
/// - `origin`: `f64`
///   Reference time subtracted from every timestamp (the first event time
///   for the binner).
/// - `edges`: `Array1<f64>`
///   `N + 1` shifted edges, non-decreasing.
/// - `widths`: `Array1<f64>`
///   `N` strictly positive widths.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBins {
    origin: f64,
    edges: Array1<f64>,
    widths: Array1<f64>,
}

impl TimeBins {
    /// Build the bin geometry for `times` (bin centers) shifted by `origin`.
    ///
    /// Errors
    /// ------
    /// - Any error from [`validate_time_axis`] or [`BinWidths::resolve`].
    /// - `ExposureError::DecreasingEdges { index }` when edge `index` falls
    ///   before edge `index - 1`.
    pub fn new(times: &[f64], dt: Option<&BinWidths>, origin: f64) -> ExposureResult<Self> {
        validate_time_axis(times)?;
        let widths = BinWidths::resolve(dt, times)?;
        let n = times.len();

        let mut edges = Array1::<f64>::zeros(n + 1);
        for i in 0..n {
            edges[i] = (times[i] - origin) - widths[i] / 2.0;
        }
        edges[n] = (times[n - 1] - origin) + widths[n - 1] / 2.0;

        if let Some(i) = edges.windows(2).into_iter().position(|w| w[1] < w[0]) {
            return Err(ExposureError::DecreasingEdges { index: i + 1 });
        }
        Ok(TimeBins { origin, edges, widths })
    }

    /// Number of bins `N`.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn origin(&self) -> f64 {
        self.origin
    }

    pub fn edges(&self) -> &Array1<f64> {
        &self.edges
    }

    pub fn widths(&self) -> &Array1<f64> {
        &self.widths
    }

    /// Shifted left edge of bin `i`.
    pub fn left_edge(&self, i: usize) -> f64 {
        self.edges[i]
    }

    pub fn first_edge(&self) -> f64 {
        self.edges[0]
    }

    pub fn last_edge(&self) -> f64 {
        self.edges[self.len()]
    }

    /// Unshifted `[first_edge, last_edge]` covered by the axis.
    pub fn absolute_range(&self) -> (f64, f64) {
        (self.first_edge() + self.origin, self.last_edge() + self.origin)
    }

    /// Right-side search over the left edges: index of the last left edge
    /// `<= t`, or `None` when `t` precedes the first edge.
    ///
    /// Equivalent to `searchsorted(edges[..N], t, side="right") - 1`, so a
    /// timestamp beyond the last edge still maps to bin `N - 1`.
    pub fn bin_of(&self, t: f64) -> Option<usize> {
        let left_edges = self.edges.as_slice()?.get(..self.len())?;
        left_edges.partition_point(|&e| e <= t).checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover width inference and broadcasting, edge construction in
    // the shifted frame, overlap detection, and the right-side bin search at
    // and around edges.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The inferred width is the median spacing, averaging the two middle
    // values for an even number of differences.
    //
    // Given
    // -----
    // - Spacings {1, 1, 3} (odd) and {1, 2, 4, 8} (even).
    //
    // Expect
    // ------
    // - 1.0 and 3.0 respectively.
    fn infer_uses_median_spacing() {
        // Act
        let odd = BinWidths::infer(&[0.0, 1.0, 2.0, 5.0]).unwrap();
        let even = BinWidths::infer(&[0.0, 1.0, 3.0, 7.0, 15.0]).unwrap();

        // Assert
        assert_relative_eq!(odd, 1.0);
        assert_relative_eq!(even, 3.0);
    }

    #[test]
    // Purpose
    // -------
    // A single bin without an explicit width cannot be resolved.
    fn infer_rejects_single_bin() {
        // Act / Assert
        assert_eq!(BinWidths::infer(&[3.0]), Err(ExposureError::CannotInferWidth { n_bins: 1 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify the edge layout of the reference scenario axis.
    //
    // Given
    // -----
    // - Centers [0.5, 1.5, 2.5], uniform dt = 1, origin = 0.
    //
    // Expect
    // ------
    // - Edges [0, 1, 2, 3]; widths all 1.
    fn new_builds_contiguous_edges() {
        // Act
        let bins = TimeBins::new(&[0.5, 1.5, 2.5], Some(&BinWidths::Uniform(1.0)), 0.0).unwrap();

        // Assert
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.edges(), &array![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(bins.widths(), &array![1.0, 1.0, 1.0]);
        assert_eq!(bins.absolute_range(), (0.0, 3.0));
    }

    #[test]
    // Purpose
    // -------
    // Edges are expressed relative to the origin while the absolute range
    // is recovered exactly for representable values.
    fn new_shifts_edges_by_origin() {
        // Act
        let bins = TimeBins::new(&[100.5, 101.5], Some(&BinWidths::Uniform(1.0)), 100.0).unwrap();

        // Assert
        assert_eq!(bins.edges(), &array![0.0, 1.0, 2.0]);
        assert_eq!(bins.absolute_range(), (100.0, 102.0));
    }

    #[test]
    // Purpose
    // -------
    // Per-bin widths that make a bin start before its predecessor are
    // rejected; wrong-length width arrays are rejected.
    fn new_rejects_decreasing_edges_and_mismatched_widths() {
        // Arrange
        let overlapping = BinWidths::PerBin(array![1.0, 4.0, 1.0]);
        let short = BinWidths::PerBin(array![1.0, 1.0]);

        // Act
        let overlap = TimeBins::new(&[0.5, 1.5, 2.5], Some(&overlapping), 0.0);
        let mismatch = TimeBins::new(&[0.5, 1.5, 2.5], Some(&short), 0.0);

        // Assert
        assert_eq!(overlap, Err(ExposureError::DecreasingEdges { index: 1 }));
        assert_eq!(
            mismatch,
            Err(ExposureError::LengthMismatch { what: "dt", expected: 3, actual: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Only edge order is enforced: partially overlapping bins whose edges
    // still increase are accepted.
    //
    // Given
    // -----
    // - Centers [0.5, 1.0] with dt = 1 (bins [0, 1) and [0.5, 1.5)).
    //
    // Expect
    // ------
    // - Construction succeeds with edges [0, 0.5, 1.5].
    fn new_accepts_partially_overlapping_bins() {
        // Act
        let bins = TimeBins::new(&[0.5, 1.0], Some(&BinWidths::Uniform(1.0)), 0.0).unwrap();

        // Assert
        assert_eq!(bins.edges(), &array![0.0, 0.5, 1.5]);
    }

    #[test]
    // Purpose
    // -------
    // Check the right-side search semantics at edges and outside the axis.
    //
    // Given
    // -----
    // - Edges [0, 1, 2, 3].
    //
    // Expect
    // ------
    // - t < 0 -> None; t = 0 -> 0; t = 1 -> 1 (edge belongs to the right
    //   bin); t = 2.999 -> 2; t = 3 and beyond -> 2.
    fn bin_of_uses_right_side_search() {
        // Arrange
        let bins = TimeBins::new(&[0.5, 1.5, 2.5], Some(&BinWidths::Uniform(1.0)), 0.0).unwrap();

        // Act / Assert
        assert_eq!(bins.bin_of(-1e-12), None);
        assert_eq!(bins.bin_of(0.0), Some(0));
        assert_eq!(bins.bin_of(1.0), Some(1));
        assert_eq!(bins.bin_of(2.999), Some(2));
        assert_eq!(bins.bin_of(3.0), Some(2));
        assert_eq!(bins.bin_of(10.0), Some(2));
    }
}
