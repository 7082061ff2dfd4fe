//! exposure::core — building blocks of the livetime binner.
//!
//! Purpose
//! -------
//! Hold the data containers and geometric helpers that the binner in
//! [`crate::exposure::livetime`] composes: bin edges and widths, event
//! streams, good time intervals, clipped livetime intervals, and options.
//!
//! Key behaviors
//! -------------
//! - [`bins`]: width inference/broadcasting and the shifted-frame edge
//!   layout with its right-side bin search.
//! - [`events`]: the [`EventSource`] seam and the owned [`EventList`].
//! - [`gti`]: GTI validation, default range, masks, condition-derived GTIs,
//!   and intersection.
//! - [`intervals`]: filtering, edge clamping and bin assignment of livetime
//!   intervals.
//! - [`options`]: [`LivetimeOptions`] and [`CorrectionOptions`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Everything here is created per call and never shared; no module keeps
//!   state between invocations.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its own branches; end-to-end
//!   binning behavior is tested in `exposure::livetime`.

pub mod bins;
pub mod events;
pub mod gti;
pub mod intervals;
pub mod options;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::bins::{BinWidths, TimeBins};
pub use self::events::{EventList, EventSource, dead_times};
pub use self::gti::Gti;
pub use self::intervals::LivetimeIntervals;
pub use self::options::{CorrectionOptions, LivetimeOptions};
