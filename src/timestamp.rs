//! Timestamps and the elapsed-time arithmetic shared by every clock.

use serde::{Deserialize, Serialize};

/// Resolution of the sub-second part of a [`Timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubsecondUnit {
    /// Microseconds (`struct timeval` style clocks).
    Micros,
    /// Nanoseconds (`struct timespec` style clocks).
    Nanos,
}

impl SubsecondUnit {
    /// Number of sub-second ticks in one second.
    pub const fn per_second(self) -> u64 {
        match self {
            SubsecondUnit::Micros => 1_000_000,
            SubsecondUnit::Nanos => 1_000_000_000,
        }
    }

    /// Short suffix used in logs and reports.
    pub const fn suffix(self) -> &'static str {
        match self {
            SubsecondUnit::Micros => "us",
            SubsecondUnit::Nanos => "ns",
        }
    }
}

/// A point in time sampled from a [`ClockSource`](crate::clock::ClockSource).
///
/// `frac` is always strictly below `unit.per_second()` for timestamps produced
/// by the clocks in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds since the clock's epoch.
    pub secs: u64,
    /// Sub-second part in `unit` ticks.
    pub frac: u64,
    /// Resolution of `frac`.
    pub unit: SubsecondUnit,
}

impl Timestamp {
    /// Create a timestamp with microsecond resolution.
    pub const fn from_micros(secs: u64, micros: u64) -> Self {
        Self {
            secs,
            frac: micros,
            unit: SubsecondUnit::Micros,
        }
    }

    /// Create a timestamp with nanosecond resolution.
    pub const fn from_nanos(secs: u64, nanos: u64) -> Self {
        Self {
            secs,
            frac: nanos,
            unit: SubsecondUnit::Nanos,
        }
    }

    /// Re-express this timestamp with nanosecond resolution.
    pub fn to_nanos(self) -> Self {
        match self.unit {
            SubsecondUnit::Nanos => self,
            SubsecondUnit::Micros => Self::from_nanos(self.secs, self.frac * 1_000),
        }
    }

    /// Milliseconds elapsed from `self` to `end`. See [`duration_ms`].
    pub fn ms_until(&self, end: &Timestamp) -> f64 {
        duration_ms(self, end)
    }
}

/// Elapsed time from `start` to `end` in milliseconds.
///
/// Computes `((e_sec - s_sec) + (e_frac - s_frac) / U) * 1000` with the
/// differences taken on signed integers, so a smaller end fraction borrows from
/// the seconds. Timestamps with different units are normalised to nanoseconds
/// first. The result is negative when `end` precedes `start`.
pub fn duration_ms(start: &Timestamp, end: &Timestamp) -> f64 {
    let (start, end) = if start.unit == end.unit {
        (*start, *end)
    } else {
        (start.to_nanos(), end.to_nanos())
    };

    let secs = end.secs as i128 - start.secs as i128;
    let frac = end.frac as i128 - start.frac as i128;
    let per_second = start.unit.per_second() as f64;

    (secs as f64 + frac as f64 / per_second) * 1.0e3
}
