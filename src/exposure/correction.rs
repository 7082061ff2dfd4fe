//! exposure::correction — dead-time correction of light curves.
//!
//! Purpose
//! -------
//! Consume a per-bin livetime array and a raw light curve on the same axis
//! and recover the dead-time-corrected rate: `rate / livetime * dt`, with
//! bins whose livetime falls below a threshold set to zero.
//!
//! Key behaviors
//! -------------
//! - [`LightCurve`] bundles a validated time axis, rate per bin, resolved
//!   bin widths and an optional GTI.
//! - [`LightCurve::apply_gti`] crosses a new GTI with the curve's own and
//!   drops the bins whose centers fall outside the result.
//! - [`correct_light_curve`] applies the correction to an existing livetime
//!   array; [`expose_and_correct`] computes the livetime from an
//!   [`EventSource`] first.
//!
//! Invariants & assumptions
//! ------------------------
//! - Bins with `livetime < expo_limit` are *degenerate*: their corrected
//!   rate is exactly zero and their index is reported. This is an expected
//!   condition, not an error.
use ndarray::Array1;
use tracing::{debug, warn};

use crate::exposure::{
    core::{
        bins::BinWidths,
        events::EventSource,
        gti::Gti,
        options::{CorrectionOptions, LivetimeOptions},
    },
    errors::ExposureResult,
    livetime::livetime_for_light_curve,
    validation::{validate_finite, validate_length, validate_time_axis},
};

/// LightCurve — binned rate series with its axis and widths.
///
/// Fields
/// ------
/// - `time`: bin centers, strictly increasing.
/// - `counts`: rate (or counts) per bin, as stored in the light curve.
/// - `dt`: one width per bin (resolved from the constructor argument).
/// - `gti`: optional good time intervals attached to the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct LightCurve {
    pub time: Array1<f64>,
    pub counts: Array1<f64>,
    pub dt: Array1<f64>,
    pub gti: Option<Gti>,
}

impl LightCurve {
    /// Validate and build a light curve.
    ///
    /// Errors
    /// ------
    /// - Axis errors from [`validate_time_axis`].
    /// - `LengthMismatch` when `counts` does not match `time`.
    /// - `NonFiniteValue` for non-finite counts.
    /// - Width errors from [`BinWidths::resolve`].
    pub fn new(
        time: Vec<f64>, counts: Vec<f64>, dt: Option<BinWidths>, gti: Option<Gti>,
    ) -> ExposureResult<Self> {
        validate_time_axis(&time)?;
        validate_length("counts", time.len(), counts.len())?;
        validate_finite("counts", &counts)?;
        let dt = BinWidths::resolve(dt.as_ref(), &time)?;
        Ok(LightCurve { time: Array1::from(time), counts: Array1::from(counts), dt, gti })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Restrict the curve to `gti`, crossed with its own GTI when present.
    ///
    /// Bins whose center lies outside the resulting GTI are dropped; the
    /// crossed GTI is attached to the returned curve.
    ///
    /// Errors
    /// ------
    /// - `EmptyTimeAxis` when no bin survives.
    pub fn apply_gti(&self, gti: &Gti) -> ExposureResult<LightCurve> {
        let gti = match &self.gti {
            Some(own) => Gti::cross(&[gti.clone(), own.clone()]),
            None => gti.clone(),
        };
        let time = self.time.as_standard_layout();
        let keep = gti.mask(time.as_slice().unwrap_or_default());
        let pick = |values: &Array1<f64>| -> Vec<f64> {
            values.iter().zip(&keep).filter(|(_, kept)| **kept).map(|(&v, _)| v).collect()
        };

        let dt = BinWidths::PerBin(Array1::from(pick(&self.dt)));
        let filtered = LightCurve::new(pick(&self.time), pick(&self.counts), Some(dt), Some(gti))?;
        debug!(n_kept = filtered.len(), n_dropped = self.len() - filtered.len(), "applied GTI");
        Ok(filtered)
    }
}

/// CorrectedLightCurve — corrected rates plus the livetime used.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectedLightCurve {
    pub time: Array1<f64>,
    pub counts: Array1<f64>,
    pub livetime: Array1<f64>,
    pub dt: Array1<f64>,
    pub gti: Option<Gti>,
    /// Bins zeroed because their livetime fell below `expo_limit`.
    pub degenerate: Vec<usize>,
}

/// Apply the dead-time correction to `lc` given per-bin `livetime`.
///
/// For each bin, the corrected value is `counts / livetime * dt`, or `0`
/// when `livetime < opts.expo_limit`.
///
/// Errors
/// ------
/// - `LengthMismatch` when `livetime` does not match the light curve.
/// - `NonFiniteValue` when `livetime` holds NaN/±∞.
pub fn correct_light_curve(
    lc: &LightCurve, livetime: &Array1<f64>, opts: &CorrectionOptions,
) -> ExposureResult<CorrectedLightCurve> {
    validate_length("livetime", lc.len(), livetime.len())?;
    validate_finite("livetime", &livetime.to_vec())?;

    let mut degenerate = Vec::new();
    let counts = Array1::from_iter((0..lc.len()).map(|i| {
        if livetime[i] < opts.expo_limit {
            degenerate.push(i);
            0.0
        } else {
            lc.counts[i] / livetime[i] * lc.dt[i]
        }
    }));

    if !degenerate.is_empty() {
        warn!(
            n_degenerate = degenerate.len(),
            expo_limit = opts.expo_limit,
            "zeroed bins with negligible exposure"
        );
    }

    Ok(CorrectedLightCurve {
        time: lc.time.clone(),
        counts,
        livetime: livetime.clone(),
        dt: lc.dt.clone(),
        gti: lc.gti.clone(),
        degenerate,
    })
}

/// Compute livetime for `lc` from `source` and apply the correction.
pub fn expose_and_correct<S: EventSource + ?Sized>(
    lc: &LightCurve, source: &S, livetime_opts: &LivetimeOptions,
    correction_opts: &CorrectionOptions,
) -> ExposureResult<CorrectedLightCurve> {
    let outcome = livetime_for_light_curve(lc, source, livetime_opts)?;
    let mut corrected = correct_light_curve(lc, &outcome.livetime, correction_opts)?;
    if corrected.gti.is_none() {
        corrected.gti = Some(outcome.gti);
    }
    Ok(corrected)
}
