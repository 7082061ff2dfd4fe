//! Python argument extraction for the PyO3 bindings.
//!
//! Converts loosely-typed Python inputs (NumPy arrays, pandas Series, plain
//! sequences, scalars) into the validated Rust types used by
//! [`crate::exposure`]. Everything here is compiled only with the
//! `python-bindings` feature.

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::exposure::{
    core::{bins::BinWidths, gti::Gti, options::LivetimeOptions},
    errors::ExposureResult,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy any accepted 1-D float input into an owned `Vec<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    Ok(arr.as_slice()?.to_vec())
}

/// `dt` may be a Python float (uniform width) or an array-like of widths.
#[cfg(feature = "python-bindings")]
pub fn extract_bin_widths<'py>(
    py: Python<'py>, dt: Option<&Bound<'py, PyAny>>,
) -> PyResult<Option<BinWidths>> {
    let Some(dt) = dt else {
        return Ok(None);
    };
    if dt.is_none() {
        return Ok(None);
    }
    if let Ok(value) = dt.extract::<f64>() {
        return Ok(Some(BinWidths::Uniform(value)));
    }
    let widths = extract_f64_vec(py, dt)?;
    Ok(Some(BinWidths::PerBin(Array1::from(widths))))
}

/// `gti` is a sequence of `(start, stop)` pairs, e.g. `[[0, 10], [12, 20]]`.
#[cfg(feature = "python-bindings")]
pub fn extract_gti(gti: Option<&Bound<'_, PyAny>>) -> PyResult<Option<Gti>> {
    let Some(gti) = gti else {
        return Ok(None);
    };
    if gti.is_none() {
        return Ok(None);
    }
    let pairs: Vec<(f64, f64)> = gti.extract().map_err(|_| {
        PyTypeError::new_err("gti must be a sequence of [start, stop] pairs of float64")
    })?;
    let gti = Gti::new(pairs.into_iter().map(|(start, stop)| [start, stop]).collect())?;
    Ok(Some(gti))
}

#[cfg(feature = "python-bindings")]
pub fn build_livetime_options(
    edge_epsilon: Option<f64>, width_tolerance: Option<f64>,
) -> ExposureResult<LivetimeOptions> {
    let defaults = LivetimeOptions::default();
    LivetimeOptions::new(
        edge_epsilon.unwrap_or(defaults.edge_epsilon),
        width_tolerance.unwrap_or(defaults.width_tolerance),
    )
}
