//! exposure — livetime binning and dead-time correction for light curves.
//!
//! Purpose
//! -------
//! Compute how long the detector was live within each bin of a light curve
//! from an unfiltered event stream carrying per-event prior livetimes, and
//! use that livetime to recover dead-time-corrected rates.
//!
//! Key behaviors
//! -------------
//! - [`compute_livetime`] is the binner: a pure function from bin centers,
//!   widths, event times and priors to one livetime value per bin, returned
//!   with diagnostics in a [`LivetimeOutcome`].
//! - [`livetime_for_light_curve`] runs the binner on the axis of a
//!   [`LightCurve`] with any [`EventSource`].
//! - [`correct_light_curve`] and [`expose_and_correct`] apply
//!   `rate / livetime * dt`, zeroing bins below the exposure threshold.
//! - [`Gti`] carries good time intervals and their helper operations.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated once at the entry points; downstream helpers rely
//!   on sorted events, non-negative priors, and strictly increasing times.
//! - All results satisfy `0 <= livetime[i] <= dt[i] + width_tolerance` or the
//!   call fails with an internal-consistency [`ExposureError`].
//!
//! Conventions
//! -----------
//! - Time values are absolute (e.g. mission elapsed time in seconds); the
//!   binner shifts them internally and reports results in the same units.
//! - A livetime interval is `[event - prior, event)`; bins are
//!   `[center - dt/2, center + dt/2)`.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_livetime::exposure::prelude::*;
//!
//!   let opts = LivetimeOptions::default();
//!   let outcome = compute_livetime(&[0.5, 1.5, 2.5], &[2.2], &[1.5], None, None, &opts)?;
//!   assert_eq!(outcome.livetime.len(), 3);
//!   # Ok::<(), ExposureError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/integration_exposure_pipeline.rs`
//!   exercises the full event stream → livetime → corrected light curve path.

pub mod core;
pub mod correction;
pub mod errors;
pub mod livetime;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    BinWidths, CorrectionOptions, EventList, EventSource, Gti, LivetimeOptions, dead_times,
};
pub use self::correction::{
    CorrectedLightCurve, LightCurve, correct_light_curve, expose_and_correct,
};
pub use self::errors::{ExposureError, ExposureResult};
pub use self::livetime::{
    BinFlag, BinFlagKind, LivetimeOutcome, compute_livetime, livetime_for_light_curve,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_livetime::exposure::prelude::*;
//
// to import the main exposure surface in a single line.

pub mod prelude {
    pub use super::core::{BinWidths, CorrectionOptions, EventList, EventSource, Gti, LivetimeOptions};
    pub use super::correction::{
        CorrectedLightCurve, LightCurve, correct_light_curve, expose_and_correct,
    };
    pub use super::errors::{ExposureError, ExposureResult};
    pub use super::livetime::{LivetimeOutcome, compute_livetime, livetime_for_light_curve};
}
