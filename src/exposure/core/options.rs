//! Configuration for livetime binning and exposure correction.
//!
//! Purpose
//! -------
//! Hold the small set of numeric knobs that control boundary clamping,
//! the tolerated overshoot of bin livetime above its width, and the
//! minimum exposure below which a corrected rate is zeroed.
//!
//! Conventions
//! -----------
//! - All values are in the same time units as the light curve (seconds for
//!   mission-elapsed-time data).
//! - Constructors validate; the `Default` impls carry the documented
//!   defaults and never fail.
use crate::exposure::errors::{ExposureError, ExposureResult};

/// Default offset used to move clamped timestamps strictly inside the axis.
pub const DEFAULT_EDGE_EPSILON: f64 = 1e-9;

/// Default slack allowed above a bin width before it is an inconsistency.
pub const DEFAULT_WIDTH_TOLERANCE: f64 = 1e-6;

/// Default minimum livetime for a bin to keep a non-zero corrected rate.
pub const DEFAULT_EXPO_LIMIT: f64 = 1e-7;

/// LivetimeOptions — knobs for [`compute_livetime`](crate::exposure::compute_livetime).
///
/// Fields
/// ------
/// - `edge_epsilon`: `f64`
///   Offset applied when a livetime start is clamped to the first edge or an
///   event is clamped to the last edge, so the right-side bin search never
///   lands exactly on an edge.
/// - `width_tolerance`: `f64`
///   Absolute slack allowed above `dt[i]`. Bins between `dt[i]` and
///   `dt[i] + width_tolerance` are flagged; anything above is an error.
///
/// Invariants
/// ----------
/// - Both fields are finite and `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LivetimeOptions {
    pub edge_epsilon: f64,
    pub width_tolerance: f64,
}

impl LivetimeOptions {
    /// Build validated options.
    ///
    /// Errors
    /// ------
    /// - `ExposureError::InvalidOption` when either value is negative or
    ///   non-finite.
    pub fn new(edge_epsilon: f64, width_tolerance: f64) -> ExposureResult<Self> {
        check_non_negative("edge_epsilon", edge_epsilon)?;
        check_non_negative("width_tolerance", width_tolerance)?;
        Ok(LivetimeOptions { edge_epsilon, width_tolerance })
    }
}

impl Default for LivetimeOptions {
    fn default() -> Self {
        LivetimeOptions {
            edge_epsilon: DEFAULT_EDGE_EPSILON,
            width_tolerance: DEFAULT_WIDTH_TOLERANCE,
        }
    }
}

/// CorrectionOptions — knobs for the exposure-correction consumer.
///
/// - `expo_limit`: bins whose livetime is strictly below this value get a
///   corrected rate of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionOptions {
    pub expo_limit: f64,
}

impl CorrectionOptions {
    pub fn new(expo_limit: f64) -> ExposureResult<Self> {
        check_non_negative("expo_limit", expo_limit)?;
        Ok(CorrectionOptions { expo_limit })
    }
}

impl Default for CorrectionOptions {
    fn default() -> Self {
        CorrectionOptions { expo_limit: DEFAULT_EXPO_LIMIT }
    }
}

fn check_non_negative(name: &'static str, value: f64) -> ExposureResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ExposureError::InvalidOption { name, value });
    }
    Ok(())
}
