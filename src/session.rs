//! Explicit measurement sessions.
//!
//! A [`Session`] holds at most one start timestamp. Callers own their
//! sessions, so independent timers never share state, and a session that was
//! never started reports [`TimingError::NotStarted`] instead of a duration.

use serde::{Deserialize, Serialize};

use crate::clock::ClockSource;
use crate::error::TimingError;
use crate::timestamp::{duration_ms, Timestamp};
use crate::trace::{debug, warn};

/// One completed start-to-stop interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Timestamp recorded by `start`.
    pub start: Timestamp,
    /// Timestamp recorded by `stop`.
    pub end: Timestamp,
    /// Elapsed milliseconds from `start` to `end`.
    pub duration_ms: f64,
}

impl Measurement {
    /// Build a measurement from two timestamps.
    pub fn between(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start,
            end,
            duration_ms: duration_ms(&start, &end),
        }
    }
}

/// State of one in-flight measurement.
#[derive(Debug, Clone, Default)]
pub struct Session {
    start: Option<Timestamp>,
}

impl Session {
    /// Create a session that has not been started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `start` has been called since creation or the last reset.
    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }

    /// The recorded start point, if any.
    pub fn start_timestamp(&self) -> Option<Timestamp> {
        self.start
    }

    /// Sample `clock` and record it as the start point, replacing any previous one.
    ///
    /// On failure the previous start point is left untouched.
    pub fn start(&mut self, clock: &dyn ClockSource) -> Result<Timestamp, TimingError> {
        let now = clock.sample()?;
        self.start = Some(now);
        debug!(clock = clock.name(), secs = now.secs, frac = now.frac, "session started");
        Ok(now)
    }

    /// Sample `clock` and measure the interval since the start point.
    ///
    /// The start point stays recorded, so repeated stops measure from the same
    /// origin until the next `start`. The clock is not sampled when the session
    /// was never started.
    pub fn stop(&self, clock: &dyn ClockSource) -> Result<Measurement, TimingError> {
        let start = self.start.ok_or(TimingError::NotStarted)?;
        let end = clock.sample()?;
        let measurement = Measurement::between(start, end);

        if measurement.duration_ms < 0.0 {
            warn!(
                clock = clock.name(),
                duration_ms = measurement.duration_ms,
                "clock went backwards during measurement"
            );
        }
        debug!(clock = clock.name(), duration_ms = measurement.duration_ms, "session stopped");
        Ok(measurement)
    }

    /// Forget the start point.
    pub fn reset(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ScriptedClock;
    use crate::timestamp::SubsecondUnit;

    #[test]
    fn test_stop_without_start_is_error() {
        let clock = ScriptedClock::from_pairs(SubsecondUnit::Nanos, &[(1, 0)]);
        let session = Session::new();
        assert!(matches!(session.stop(&clock), Err(TimingError::NotStarted)));
        // The clock must not have been consumed.
        assert_eq!(clock.remaining(), 1);
    }

    #[test]
    fn test_start_overwrites_previous() {
        let clock =
            ScriptedClock::from_pairs(SubsecondUnit::Micros, &[(1, 0), (5, 0), (5, 250_000)]);
        let mut session = Session::new();
        session.start(&clock).unwrap();
        session.start(&clock).unwrap();
        let m = session.stop(&clock).unwrap();
        assert!((m.duration_ms - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_stop_keeps_origin() {
        let clock =
            ScriptedClock::from_pairs(SubsecondUnit::Micros, &[(0, 0), (0, 1_000), (0, 3_000)]);
        let mut session = Session::new();
        session.start(&clock).unwrap();
        assert!((session.stop(&clock).unwrap().duration_ms - 1.0).abs() < 1e-9);
        assert!((session.stop(&clock).unwrap().duration_ms - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_failed_start_keeps_previous_origin() {
        let clock = ScriptedClock::new(SubsecondUnit::Nanos);
        clock.push(2, 0);
        clock.push_failure();
        clock.push(3, 0);

        let mut session = Session::new();
        session.start(&clock).unwrap();
        assert!(session.start(&clock).is_err());
        assert_eq!(session.start_timestamp(), Some(Timestamp::from_nanos(2, 0)));
        assert!((session.stop(&clock).unwrap().duration_ms - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_forgets_start() {
        let clock = ScriptedClock::from_pairs(SubsecondUnit::Nanos, &[(1, 0)]);
        let mut session = Session::new();
        session.start(&clock).unwrap();
        assert!(session.is_started());
        session.reset();
        assert!(!session.is_started());
        assert!(matches!(session.stop(&clock), Err(TimingError::NotStarted)));
    }

    #[test]
    fn test_independent_sessions() {
        let clock = ScriptedClock::from_pairs(
            SubsecondUnit::Micros,
            &[(0, 0), (0, 100_000), (0, 200_000), (0, 300_000)],
        );
        let mut outer = Session::new();
        let mut inner = Session::new();
        outer.start(&clock).unwrap();
        inner.start(&clock).unwrap();
        let inner_m = inner.stop(&clock).unwrap();
        let outer_m = outer.stop(&clock).unwrap();
        assert!((inner_m.duration_ms - 100.0).abs() < 1e-9);
        assert!((outer_m.duration_ms - 300.0).abs() < 1e-9);
    }
}
