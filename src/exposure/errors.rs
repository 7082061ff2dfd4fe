//! exposure::errors — error taxonomy for livetime binning and correction.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the livetime binner,
//! its input guards, and the exposure-correction consumer, together with a
//! conversion layer to Python exceptions for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`ExposureResult`] and [`ExposureError`] as the canonical result
//!   and error types for everything under `exposure`.
//! - Split variants into two families:
//!   - *invalid input*: detected up front, before any computation, and
//!   - *internal inconsistency*: a computed contribution is negative or a
//!     bin accumulated more livetime than its width allows.
//! - Expose [`ExposureError::is_internal`] so callers can tell the two
//!   families apart without matching on every variant.
//!
//! Invariants & assumptions
//! ------------------------
//! - Internal-inconsistency variants are never produced for inputs that
//!   passed validation unless the event stream itself is physically
//!   inconsistent (overlapping livetime intervals) or the binning code is
//!   wrong. They are hard failures and are never downgraded to warnings.
//! - Bins with livetime below the correction threshold are *not* errors;
//!   they are reported through `CorrectedLightCurve::degenerate`.
//!
//! Conventions
//! -----------
//! - Indices are 0-based and refer to the caller's arrays (bin index for
//!   bin-level failures, event index for event-level failures).
//! - Messages are phrased in terms of the violated constraint
//!   ("priors must be >= 0") and embed the offending value.
//!
//! Testing notes
//! -------------
//! - Unit tests check that every message embeds its payload and that
//!   `is_internal` classifies each family correctly.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for exposure operations that may produce [`ExposureError`].
pub type ExposureResult<T> = Result<T, ExposureError>;

/// ExposureError — failures of livetime binning and exposure correction.
///
/// Variants
/// --------
/// Invalid input:
/// - `EmptyTimeAxis`: the light-curve time axis has no bins.
/// - `LengthMismatch { what, expected, actual }`: two arrays that must be
///   paired element-wise have different lengths.
/// - `NonFiniteValue { what, index, value }`: NaN or ±∞ in an input array.
/// - `NegativePrior { index, value }`: a prior livetime is below zero.
/// - `TimesNotAscending { index }`: `times[index] <= times[index - 1]`.
/// - `EventsNotSorted { index }`: `events[index] < events[index - 1]`.
/// - `CannotInferWidth { n_bins }`: no width given and fewer than two bins.
/// - `InvalidBinWidth { index, value }`: a width is non-finite or `<= 0`.
/// - `DecreasingEdges { index }`: bin edge `index` precedes edge `index - 1`.
///   Only edge order is checked; partially overlapping or gapped axes pass.
/// - `InvalidGti { index, start, stop, reason }`: malformed GTI entry.
/// - `InvalidOption { name, value }`: a configuration value is out of range.
///
/// Internal inconsistency:
/// - `NegativeContribution { bin, event, value }`: a same-bin, partial-bin
///   or interior contribution came out negative.
/// - `LivetimeExceedsWidth { bin, livetime, width }`: total bin livetime
///   exceeds its width by more than the configured tolerance.
#[derive(Debug, Clone, PartialEq)]
pub enum ExposureError {
    // ---- Invalid input ----
    EmptyTimeAxis,
    LengthMismatch { what: &'static str, expected: usize, actual: usize },
    NonFiniteValue { what: &'static str, index: usize, value: f64 },
    NegativePrior { index: usize, value: f64 },
    TimesNotAscending { index: usize },
    EventsNotSorted { index: usize },
    CannotInferWidth { n_bins: usize },
    InvalidBinWidth { index: usize, value: f64 },
    DecreasingEdges { index: usize },
    InvalidGti { index: usize, start: f64, stop: f64, reason: &'static str },
    InvalidOption { name: &'static str, value: f64 },

    // ---- Internal inconsistency ----
    NegativeContribution { bin: usize, event: usize, value: f64 },
    LivetimeExceedsWidth { bin: usize, livetime: f64, width: f64 },
}

impl ExposureError {
    /// `true` for variants signalling an internal-consistency failure rather
    /// than rejected input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ExposureError::NegativeContribution { .. } | ExposureError::LivetimeExceedsWidth { .. }
        )
    }
}

impl std::error::Error for ExposureError {}

impl std::fmt::Display for ExposureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Invalid input ----
            ExposureError::EmptyTimeAxis => write!(f, "Time axis must contain at least one bin."),
            ExposureError::LengthMismatch { what, expected, actual } => {
                write!(f, "Length mismatch for {what}: expected {expected}, got {actual}.")
            }
            ExposureError::NonFiniteValue { what, index, value } => {
                write!(f, "{what}[{index}] is non-finite: {value}")
            }
            ExposureError::NegativePrior { index, value } => {
                write!(f, "Prior at index {index} is negative: {value}. Priors must be >= 0.")
            }
            ExposureError::TimesNotAscending { index } => {
                write!(f, "Bin times must be strictly increasing; violated at index {index}.")
            }
            ExposureError::EventsNotSorted { index } => {
                write!(f, "Event times must be sorted ascending; violated at index {index}.")
            }
            ExposureError::CannotInferWidth { n_bins } => write!(
                f,
                "Cannot infer bin width from {n_bins} bin(s); pass dt explicitly or provide >= 2 bins."
            ),
            ExposureError::InvalidBinWidth { index, value } => {
                write!(f, "Bin width at index {index} must be finite and > 0; got {value}.")
            }
            ExposureError::DecreasingEdges { index } => {
                write!(f, "Bin edge {index} precedes edge {}; bin edges must not decrease.", index - 1)
            }
            ExposureError::InvalidGti { index, start, stop, reason } => {
                write!(f, "Invalid GTI at index {index} ([{start}, {stop}]): {reason}")
            }
            ExposureError::InvalidOption { name, value } => {
                write!(f, "Option {name} must be finite and >= 0; got {value}.")
            }

            // ---- Internal inconsistency ----
            ExposureError::NegativeContribution { bin, event, value } => write!(
                f,
                "Internal inconsistency: event {event} contributed negative livetime {value} to bin {bin}."
            ),
            ExposureError::LivetimeExceedsWidth { bin, livetime, width } => write!(
                f,
                "Internal inconsistency: bin {bin} accumulated livetime {livetime} above its width {width}."
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ExposureError> for PyErr {
    fn from(err: ExposureError) -> PyErr {
        PyValueError::new_err(format!("ExposureError: {err}"))
    }
}
