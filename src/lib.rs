//! rust_livetime — livetime binning and dead-time correction for light curves.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the exposure routines to Python via the `_rust_livetime` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing functions and the `exposure` submodule.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`exposure`) as the public crate surface.
//! - Define `#[pyfunction]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_livetime` Python extension.
//! - Register the `exposure` submodule in `sys.modules` so that
//!   `rust_livetime.exposure` imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in [`exposure`]; this file performs
//!   only FFI glue, argument conversion, and error mapping.
//! - Python inputs are converted to contiguous `f64` buffers before any
//!   validation; all validation happens in the Rust core.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are propagated as [`exposure::ExposureError`]
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by `tests/integration_exposure_pipeline.rs`.
//! - The PyO3 wrappers are exercised from Python.

pub mod exposure;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    exposure::{CorrectionOptions, LightCurve, compute_livetime, correct_light_curve},
    utils::{build_livetime_options, extract_bin_widths, extract_f64_vec, extract_gti},
};

/// Livetime per light-curve bin from an unfiltered event stream.
///
/// Parameters
/// ----------
/// - `times`: bin centers (array-like of float64, strictly increasing).
/// - `events`: event times (array-like of float64, sorted ascending).
/// - `priors`: livetime before each event (same length as `events`, >= 0).
/// - `dt`: float or array-like of bin widths; defaults to the median spacing.
/// - `gti`: optional `[[start, stop], ...]`, validated but not used to alter
///   livetime.
/// - `edge_epsilon`, `width_tolerance`: see `LivetimeOptions`.
///
/// Returns
/// -------
/// A float64 NumPy array with one livetime value per bin.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "compute_livetime")]
#[pyo3(
    text_signature = "(times, events, priors, /, dt=None, gti=None, edge_epsilon=1e-9, width_tolerance=1e-6)",
    signature = (times, events, priors, dt = None, gti = None, edge_epsilon = None, width_tolerance = None)
)]
#[allow(clippy::too_many_arguments)]
fn py_compute_livetime<'py>(
    py: Python<'py>, times: &Bound<'py, PyAny>, events: &Bound<'py, PyAny>,
    priors: &Bound<'py, PyAny>, dt: Option<&Bound<'py, PyAny>>, gti: Option<&Bound<'py, PyAny>>,
    edge_epsilon: Option<f64>, width_tolerance: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let times = extract_f64_vec(py, times)?;
    let events = extract_f64_vec(py, events)?;
    let priors = extract_f64_vec(py, priors)?;
    let dt = extract_bin_widths(py, dt)?;
    let gti = extract_gti(gti)?;
    let opts = build_livetime_options(edge_epsilon, width_tolerance)?;

    let outcome = compute_livetime(&times, &events, &priors, dt.as_ref(), gti.as_ref(), &opts)?;
    Ok(outcome.livetime.into_pyarray(py))
}

/// Dead-time-corrected light curve from a raw light curve and its livetime.
///
/// Returns `(corrected_lc, livetime)`; bins with livetime below
/// `expo_limit` are set to zero.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "correct_lightcurve")]
#[pyo3(
    text_signature = "(time, lc, livetime, /, dt=None, expo_limit=1e-7)",
    signature = (time, lc, livetime, dt = None, expo_limit = None)
)]
fn py_correct_lightcurve<'py>(
    py: Python<'py>, time: &Bound<'py, PyAny>, lc: &Bound<'py, PyAny>,
    livetime: &Bound<'py, PyAny>, dt: Option<&Bound<'py, PyAny>>, expo_limit: Option<f64>,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let time = extract_f64_vec(py, time)?;
    let counts = extract_f64_vec(py, lc)?;
    let livetime = ndarray::Array1::from(extract_f64_vec(py, livetime)?);
    let dt = extract_bin_widths(py, dt)?;
    let opts = match expo_limit {
        Some(limit) => CorrectionOptions::new(limit)?,
        None => CorrectionOptions::default(),
    };

    let curve = LightCurve::new(time, counts, dt, None)?;
    let corrected = correct_light_curve(&curve, &livetime, &opts)?;
    Ok((corrected.counts.into_pyarray(py), corrected.livetime.into_pyarray(py)))
}

/// _rust_livetime — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_livetime` Python module and register the `exposure`
/// submodule used by the public `rust_livetime` package.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_livetime<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let exposure_mod = PyModule::new(_py, "exposure")?;
    exposure(_py, m, &exposure_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_livetime.exposure", exposure_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn exposure<'py>(
    _py: Python, rust_livetime: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_compute_livetime, m)?)?;
    m.add_function(wrap_pyfunction!(py_correct_lightcurve, m)?)?;
    rust_livetime.add_submodule(m)?;
    Ok(())
}
