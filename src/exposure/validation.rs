//! exposure::validation — up-front input guards for livetime binning.
//!
//! Purpose
//! -------
//! Centralize the checks that must pass before any livetime arithmetic is
//! attempted, so malformed input is rejected in one place with a precise
//! [`ExposureError`] rather than surfacing later as a wrong number.
//!
//! Key behaviors
//! -------------
//! - Reject empty, non-finite, or non-increasing bin-time axes.
//! - Reject event streams whose priors are negative or mismatched in length,
//!   and event times that are not sorted ascending.
//! - Reject non-positive or non-finite bin widths and malformed GTI lists.
//!
//! Conventions
//! -----------
//! - Every guard scans its input once and stops at the first violation;
//!   the reported index is that of the first offending element.
//! - Guards never allocate and never panic.
//!
//! Testing notes
//! -------------
//! - Unit tests exercise each error branch and a success path per guard.
use crate::exposure::errors::{ExposureError, ExposureResult};

/// Check that `actual == expected`, naming the array in the error.
pub fn validate_length(what: &'static str, expected: usize, actual: usize) -> ExposureResult<()> {
    if expected != actual {
        return Err(ExposureError::LengthMismatch { what, expected, actual });
    }
    Ok(())
}

/// Check that every element of `data` is finite.
pub fn validate_finite(what: &'static str, data: &[f64]) -> ExposureResult<()> {
    match data.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ExposureError::NonFiniteValue { what, index, value: data[index] }),
        None => Ok(()),
    }
}

/// Validate a light-curve time axis (bin centers).
///
/// Errors
/// ------
/// - `ExposureError::EmptyTimeAxis` when `times` is empty.
/// - `ExposureError::NonFiniteValue` for NaN/±∞ entries.
/// - `ExposureError::TimesNotAscending { index }` when
///   `times[index] <= times[index - 1]`.
pub fn validate_time_axis(times: &[f64]) -> ExposureResult<()> {
    if times.is_empty() {
        return Err(ExposureError::EmptyTimeAxis);
    }
    validate_finite("times", times)?;
    match times.windows(2).position(|w| w[1] <= w[0]) {
        Some(i) => Err(ExposureError::TimesNotAscending { index: i + 1 }),
        None => Ok(()),
    }
}

/// Validate a paired (event time, prior livetime) stream.
///
/// Errors
/// ------
/// - `ExposureError::LengthMismatch` when `priors.len() != events.len()`.
/// - `ExposureError::NonFiniteValue` for NaN/±∞ in either array.
/// - `ExposureError::NegativePrior` for any prior below zero.
/// - `ExposureError::EventsNotSorted { index }` when
///   `events[index] < events[index - 1]`. Equal timestamps are allowed.
pub fn validate_events(events: &[f64], priors: &[f64]) -> ExposureResult<()> {
    validate_length("priors", events.len(), priors.len())?;
    validate_finite("events", events)?;
    validate_finite("priors", priors)?;
    if let Some(index) = priors.iter().position(|&p| p < 0.0) {
        return Err(ExposureError::NegativePrior { index, value: priors[index] });
    }
    match events.windows(2).position(|w| w[1] < w[0]) {
        Some(i) => Err(ExposureError::EventsNotSorted { index: i + 1 }),
        None => Ok(()),
    }
}

/// Validate per-bin widths: each must be finite and strictly positive.
pub fn validate_bin_widths(widths: &[f64]) -> ExposureResult<()> {
    match widths.iter().position(|&w| !w.is_finite() || w <= 0.0) {
        Some(index) => Err(ExposureError::InvalidBinWidth { index, value: widths[index] }),
        None => Ok(()),
    }
}

/// Validate a GTI list given as `[start, stop]` pairs.
///
/// Requires finite bounds, `start <= stop`, and intervals sorted ascending
/// without overlap (`start[i] >= stop[i - 1]`).
pub fn validate_gti(intervals: &[[f64; 2]]) -> ExposureResult<()> {
    let mut previous_stop = f64::NEG_INFINITY;
    for (index, &[start, stop]) in intervals.iter().enumerate() {
        if !start.is_finite() || !stop.is_finite() {
            return Err(ExposureError::InvalidGti { index, start, stop, reason: "non-finite bound" });
        }
        if stop < start {
            return Err(ExposureError::InvalidGti { index, start, stop, reason: "stop before start" });
        }
        if start < previous_stop {
            return Err(ExposureError::InvalidGti {
                index,
                start,
                stop,
                reason: "overlaps or precedes previous interval",
            });
        }
        previous_stop = stop;
    }
    Ok(())
}
