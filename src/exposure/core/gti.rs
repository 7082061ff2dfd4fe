//! Good Time Interval lists.
//!
//! Purpose
//! -------
//! Represent the ordered `[start, stop]` ranges outside of which light-curve
//! data is invalid, and provide the handful of operations the exposure
//! pipeline needs: the default full-axis GTI, membership masks, GTIs derived
//! from a boolean condition on a binned series, and intersection of lists.
//!
//! Invariants & assumptions
//! ------------------------
//! - Bounds are finite, `start <= stop`, and intervals are ascending and
//!   non-overlapping (touching is allowed).
//! - Bounds are absolute (unshifted) times.
//!
//! Notes
//! -----
//! - The livetime binner only validates, defaults and reports the GTI; it
//!   credits interior bins their full width even when a GTI gap crosses them.
use crate::exposure::{
    core::bins::{BinWidths, TimeBins},
    errors::ExposureResult,
    validation::{validate_bin_widths, validate_gti, validate_length, validate_time_axis},
};

/// Gti — validated list of good time intervals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gti {
    intervals: Vec<[f64; 2]>,
}

impl Gti {
    /// Validate and wrap `[start, stop]` pairs.
    ///
    /// Errors
    /// ------
    /// - `ExposureError::InvalidGti` for non-finite bounds, inverted
    ///   intervals, or intervals out of order / overlapping.
    pub fn new(intervals: Vec<[f64; 2]>) -> ExposureResult<Self> {
        validate_gti(&intervals)?;
        Ok(Gti { intervals })
    }

    /// Single interval spanning the whole axis:
    /// `[times[0] - dt[0]/2, times[-1] + dt[-1]/2]`.
    pub fn covering(bins: &TimeBins) -> Self {
        let (start, stop) = bins.absolute_range();
        Gti { intervals: vec![[start, stop]] }
    }

    pub fn intervals(&self) -> &[[f64; 2]] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total time covered by the list.
    pub fn total_exposure(&self) -> f64 {
        self.intervals.iter().map(|[start, stop]| stop - start).sum()
    }

    /// `true` when `t` lies inside any interval (both ends inclusive).
    pub fn contains(&self, t: f64) -> bool {
        let idx = self.intervals.partition_point(|&[start, _]| start <= t);
        idx > 0 && t <= self.intervals[idx - 1][1]
    }

    /// Membership mask of `times` against this list.
    pub fn mask(&self, times: &[f64]) -> Vec<bool> {
        times.iter().map(|&t| self.contains(t)).collect()
    }

    /// Build GTIs from the contiguous runs of `good` over a binned axis.
    ///
    /// Each run `i..=j` becomes
    /// `[times[i] - dt/2 + safe_interval.0, times[j] + dt/2 - safe_interval.1]`;
    /// runs that vanish once the safe interval is removed are dropped. `dt`
    /// defaults to the median spacing of `times`.
    ///
    /// Errors
    /// ------
    /// - Axis errors from [`validate_time_axis`].
    /// - `ExposureError::LengthMismatch` when `good.len() != times.len()`.
    /// - `ExposureError::CannotInferWidth` with a single bin and no `dt`.
    /// - `ExposureError::InvalidBinWidth` when `dt` is non-finite or `<= 0`.
    pub fn from_condition(
        times: &[f64], good: &[bool], dt: Option<f64>, safe_interval: (f64, f64),
    ) -> ExposureResult<Self> {
        validate_time_axis(times)?;
        validate_length("condition", times.len(), good.len())?;
        let dt = match dt {
            Some(value) => {
                validate_bin_widths(&[value])?;
                value
            }
            None => BinWidths::infer(times)?,
        };
        let (safe_start, safe_stop) = safe_interval;

        let mut intervals = Vec::new();
        let mut run_start: Option<usize> = None;
        for i in 0..=times.len() {
            let is_good = i < times.len() && good[i];
            match (run_start, is_good) {
                (None, true) => run_start = Some(i),
                (Some(first), false) => {
                    let start = times[first] - dt / 2.0 + safe_start;
                    let stop = times[i - 1] + dt / 2.0 - safe_stop;
                    if stop > start {
                        intervals.push([start, stop]);
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
        Gti::new(intervals)
    }

    /// Intersection of several GTI lists. An empty slice yields an empty list.
    pub fn cross(gtis: &[Gti]) -> Gti {
        let mut iter = gtis.iter();
        let Some(first) = iter.next() else {
            return Gti::default();
        };
        iter.fold(first.clone(), |acc, next| acc.intersect(next))
    }

    fn intersect(&self, other: &Gti) -> Gti {
        let (a, b) = (&self.intervals, &other.intervals);
        let (mut i, mut j) = (0, 0);
        let mut out = Vec::new();
        while i < a.len() && j < b.len() {
            let start = a[i][0].max(b[j][0]);
            let stop = a[i][1].min(b[j][1]);
            if stop > start {
                out.push([start, stop]);
            }
            if a[i][1] < b[j][1] {
                i += 1;
            } else {
                j += 1;
            }
        }
        Gti { intervals: out }
    }
}
