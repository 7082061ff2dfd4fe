//! Event streams carrying per-event prior livetimes.
//!
//! [`EventSource`] is the seam between whatever reads an unfiltered event
//! file and the livetime binner: it hands out event times sorted ascending
//! and the matching `PRIOR` values. [`EventList`] is the owned, validated
//! implementation used by callers that already hold the two arrays.
use ndarray::Array1;

use crate::exposure::{errors::ExposureResult, validation::validate_events};

/// Supplier of sorted event times and their prior livetimes.
///
/// Implementors guarantee `event_times().len() == priors().len()`, event
/// times sorted ascending, and priors `>= 0`. The binner re-validates these
/// before use.
pub trait EventSource {
    /// Absolute event timestamps, ascending.
    fn event_times(&self) -> &[f64];

    /// Livetime preceding each event; the live interval of event `i` is
    /// `[event_times()[i] - priors()[i], event_times()[i])`.
    fn priors(&self) -> &[f64];

    fn n_events(&self) -> usize {
        self.event_times().len()
    }
}

/// EventList — validated owned pair of event times and priors.
#[derive(Debug, Clone, PartialEq)]
pub struct EventList {
    times: Vec<f64>,
    priors: Vec<f64>,
}

impl EventList {
    /// Validate and wrap an event stream.
    ///
    /// Errors
    /// ------
    /// - Any error from [`validate_events`]: length mismatch, non-finite
    ///   values, negative priors, or unsorted event times.
    pub fn new(times: Vec<f64>, priors: Vec<f64>) -> ExposureResult<Self> {
        validate_events(&times, &priors)?;
        Ok(EventList { times, priors })
    }

    /// Dead time between consecutive events: `t[i] - t[i-1] - prior[i]` for
    /// `i >= 1`.
    ///
    /// Negative values point at priors longer than the gap to the previous
    /// event, which the binner later reports as overlapping livetime.
    pub fn dead_times(&self) -> Array1<f64> {
        dead_times(self)
    }
}

impl EventSource for EventList {
    fn event_times(&self) -> &[f64] {
        &self.times
    }

    fn priors(&self) -> &[f64] {
        &self.priors
    }
}

/// Dead time preceding each livetime interval of any [`EventSource`].
///
/// Returns an array of length `n_events - 1` (empty for fewer than two
/// events).
pub fn dead_times<S: EventSource + ?Sized>(source: &S) -> Array1<f64> {
    let times = source.event_times();
    let priors = source.priors();
    times.windows(2).zip(priors.iter().skip(1)).map(|(w, &p)| w[1] - w[0] - p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposure::errors::ExposureError;
    use approx::assert_abs_diff_eq;

    #[test]
    // Purpose
    // -------
    // `EventList::new` validates through the shared guards.
    //
    // Expect
    // ------
    // - Unsorted times are rejected with `EventsNotSorted`.
    fn new_rejects_unsorted_events() {
        // Act
        let result = EventList::new(vec![2.0, 1.0], vec![0.1, 0.1]);

        // Assert
        assert_eq!(result, Err(ExposureError::EventsNotSorted { index: 1 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify the dead-time definition on a short stream.
    //
    // Given
    // -----
    // - Events [1.0, 1.5, 3.0] with priors [0.2, 0.4, 1.0].
    //
    // Expect
    // ------
    // - Dead times [0.5 - 0.4, 1.5 - 1.0] = [0.1, 0.5].
    fn dead_times_subtract_prior_from_gap() {
        // Arrange
        let events = EventList::new(vec![1.0, 1.5, 3.0], vec![0.2, 0.4, 1.0]).unwrap();

        // Act
        let dead = events.dead_times();

        // Assert
        assert_eq!(dead.len(), 2);
        assert_abs_diff_eq!(dead[0], 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(dead[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Streams with fewer than two events have no dead-time samples.
    fn dead_times_empty_for_single_event() {
        // Arrange
        let events = EventList::new(vec![1.0], vec![0.2]).unwrap();

        // Act / Assert
        assert!(events.dead_times().is_empty());
        assert_eq!(events.n_events(), 1);
    }
}
