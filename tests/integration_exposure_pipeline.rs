//! Integration tests for livetime binning and dead-time correction.
//!
//! Purpose
//! -------
//! - Validate the end-to-end exposure pipeline: from an event stream with
//!   prior livetimes, through per-bin livetime, to a dead-time-corrected
//!   light curve.
//! - Exercise realistic stream shapes (periodic events with constant dead
//!   time, mission-elapsed-time offsets, events outside the light curve)
//!   rather than single-event toys only.
//!
//! Coverage
//! --------
//! - `exposure::compute_livetime` on dense streams and GTI defaults.
//! - `exposure::expose_and_correct` with `EventList` as the event source.
//! - `exposure::Gti` helpers on the resulting curve.
//! - A custom `EventSource` implementation.
//!
//! Exclusions
//! ----------
//! - Branch-level validation and clamping details, covered by unit tests.
//! - Python bindings, exercised from Python.
use approx::assert_abs_diff_eq;
use ndarray::Array1;
use rust_livetime::exposure::{
    BinFlagKind, BinWidths, CorrectionOptions, EventList, EventSource, ExposureError, Gti,
    LightCurve, LivetimeOptions, compute_livetime, dead_times, expose_and_correct,
};

/// Purpose
/// -------
/// Build a periodic event stream: one event every `period` seconds starting
/// at `t_start + period`, each preceded by `period - dead` seconds of
/// livetime.
///
/// Returns
/// -------
/// - An `EventList` whose livetime intervals tile time with gaps of exactly
///   `dead` seconds of dead time after each event.
fn periodic_stream(t_start: f64, n: usize, period: f64, dead: f64) -> EventList {
    let times: Vec<f64> = (1..=n).map(|i| t_start + period * i as f64).collect();
    let priors = vec![period - dead; n];
    EventList::new(times, priors).expect("periodic stream is sorted with non-negative priors")
}

/// Purpose
/// -------
/// Bin centers for `n` contiguous bins of width `dt` starting at `t_start`.
fn centers(t_start: f64, n: usize, dt: f64) -> Vec<f64> {
    (0..n).map(|i| t_start + dt * (i as f64 + 0.5)).collect()
}

struct ShieldFiltered {
    times: Vec<f64>,
    priors: Vec<f64>,
}

impl EventSource for ShieldFiltered {
    fn event_times(&self) -> &[f64] {
        &self.times
    }

    fn priors(&self) -> &[f64] {
        &self.priors
    }
}

#[test]
// Purpose
// -------
// A periodic stream with constant dead fraction yields a constant livetime
// fraction in every interior bin.
//
// Given
// -----
// - Events every 0.01 s with 0.002 s of dead time each, covering 10 bins of
//   1 s at a mission-elapsed-time offset of 2.5e8 s.
//
// Expect
// ------
// - Each bin's livetime ≈ 0.8 s; no bin flagged; default GTI spans the axis.
fn periodic_stream_gives_constant_live_fraction() {
    // Arrange
    let t0 = 2.5e8;
    let stream = periodic_stream(t0, 1000, 0.01, 0.002);
    let times = centers(t0, 10, 1.0);

    // Act
    let out = compute_livetime(
        &times,
        stream.event_times(),
        stream.priors(),
        Some(&BinWidths::Uniform(1.0)),
        None,
        &LivetimeOptions::default(),
    )
    .expect("livetime computation should succeed on a consistent stream");

    // Assert
    assert_eq!(out.livetime.len(), 10);
    for (i, &lt) in out.livetime.iter().enumerate() {
        assert_abs_diff_eq!(lt, 0.8, epsilon = 1e-5);
        assert!(lt <= 1.0, "bin {i} above width: {lt}");
    }
    assert!(out.flags.iter().all(|f| !matches!(f.kind, BinFlagKind::NoExposure)));
    let [start, stop] = out.gti.intervals()[0];
    assert_abs_diff_eq!(start, t0, epsilon = 1e-6);
    assert_abs_diff_eq!(stop, t0 + 10.0, epsilon = 1e-6);
}

#[test]
// Purpose
// -------
// Correcting a light curve whose counts were suppressed by dead time
// restores the true rate.
//
// Given
// -----
// - True rate 100 counts/s, 20% dead time per bin, so observed rate 80.
// - A light-curve axis of 5 bins with edges at 1.005 + k, so the first
//   and last livetime intervals straddle the axis edges and get clamped.
//
// Expect
// ------
// - Corrected rate ≈ 100 in every bin; no degenerate bins.
fn correction_restores_true_rate() {
    // Arrange
    let stream = periodic_stream(0.0, 800, 0.01, 0.002);
    let lc = LightCurve::new(
        centers(1.005, 5, 1.0),
        vec![80.0; 5],
        Some(BinWidths::Uniform(1.0)),
        None,
    )
    .expect("light curve is well formed");

    // Act
    let corrected = expose_and_correct(
        &lc,
        &stream,
        &LivetimeOptions::default(),
        &CorrectionOptions::default(),
    )
    .expect("pipeline should succeed");

    // Assert
    for &rate in corrected.counts.iter() {
        assert_abs_diff_eq!(rate, 100.0, epsilon = 1e-3);
    }
    assert!(corrected.degenerate.is_empty());
    assert_eq!(corrected.livetime.len(), 5);
}

#[test]
// Purpose
// -------
// Bins with no events at all get zero livetime, are flagged, and are zeroed
// by the correction instead of dividing by zero.
//
// Given
// -----
// - Events only in the first 2 s of a 4-bin light curve.
//
// Expect
// ------
// - Bins 2 and 3 have zero livetime and are reported degenerate; the GTI
//   built from the non-degenerate bins covers [0, 2].
fn empty_bins_are_degenerate() {
    // Arrange
    let stream = periodic_stream(0.0, 190, 0.01, 0.002);
    let lc = LightCurve::new(centers(0.0, 4, 1.0), vec![50.0; 4], None, None).unwrap();

    // Act
    let corrected = expose_and_correct(
        &lc,
        &stream,
        &LivetimeOptions::default(),
        &CorrectionOptions::default(),
    )
    .unwrap();
    let good: Vec<bool> = corrected.livetime.iter().map(|&lt| lt > 1e-7).collect();
    let gti = Gti::from_condition(corrected.time.as_slice().unwrap(), &good, None, (0.0, 0.0))
        .unwrap();

    // Assert
    assert_eq!(corrected.degenerate, vec![2, 3]);
    assert_eq!(corrected.counts[2], 0.0);
    assert_eq!(corrected.counts[3], 0.0);
    assert_eq!(gti.intervals(), &[[0.0, 2.0]]);
    assert_eq!(gti.mask(corrected.time.as_slice().unwrap()), vec![true, true, false, false]);
}

#[test]
// Purpose
// -------
// Any `EventSource` implementation feeds the pipeline, and dead times are
// derived from the same trait.
fn custom_event_source_is_accepted() {
    // Arrange
    let source = ShieldFiltered { times: vec![0.5, 1.2, 2.9], priors: vec![0.4, 0.6, 1.5] };
    let lc = LightCurve::new(centers(0.0, 3, 1.0), vec![1.0, 1.0, 1.0], None, None).unwrap();

    // Act
    let corrected = expose_and_correct(
        &lc,
        &source,
        &LivetimeOptions::default(),
        &CorrectionOptions::default(),
    )
    .unwrap();
    let dead: Array1<f64> = dead_times(&source);

    // Assert
    assert_abs_diff_eq!(corrected.livetime[0], 0.4 + 0.4, epsilon = 1e-9);
    assert_abs_diff_eq!(corrected.livetime[1], 0.2 + 0.6, epsilon = 1e-9);
    assert_abs_diff_eq!(corrected.livetime[2], 0.9, epsilon = 1e-9);
    assert_abs_diff_eq!(dead[0], 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(dead[1], 0.2, epsilon = 1e-12);
}

#[test]
// Purpose
// -------
// Physically inconsistent priors (longer than the gap to the previous
// event) surface as an internal-consistency error, not a clipped result.
fn inconsistent_priors_fail_hard() {
    // Arrange
    let times = centers(0.0, 2, 1.0);
    let events = [0.3, 0.9];
    let priors = [0.3, 0.9];

    // Act
    let result = compute_livetime(
        &times,
        &events,
        &priors,
        None,
        None,
        &LivetimeOptions::default(),
    );

    // Assert
    match result {
        Err(err @ ExposureError::LivetimeExceedsWidth { bin: 0, .. }) => assert!(err.is_internal()),
        other => panic!("expected LivetimeExceedsWidth for bin 0, got {other:?}"),
    }
}
