//! Clock providers.
//!
//! Every target environment supplies time through [`ClockSource`], which
//! yields uniform `(seconds, sub-second fraction, unit)` samples. The elapsed
//! time arithmetic lives in [`crate::timestamp`] and is shared by all of them.
//!
//! # Providers
//!
//! - [`HostMonotonicClock`]: host OS monotonic clock, nanoseconds
//! - [`WallClock`]: wall-clock time since the Unix epoch, microseconds. This is
//!   what simulated targets expose through their proxy kernel's `gettimeofday`.
//! - [`CycleCounterClock`]: raw CPU counter (`rdtsc`, `cntvct_el0`, `rdtime`)
//!   scaled by a known or calibrated frequency, nanoseconds
//! - [`ScriptedClock`]: replays queued timestamps, for harness tests

mod counter;
mod monotonic;
mod scripted;
mod wall;

use std::fmt::Debug;

use crate::error::TimingError;
use crate::timestamp::{SubsecondUnit, Timestamp};

pub use counter::{calibrate_ticks_per_ns, native_frequency_hz, read_counter, CycleCounterClock};
pub use monotonic::HostMonotonicClock;
pub use scripted::ScriptedClock;
pub use wall::WallClock;

/// A source of timestamps for one target environment.
pub trait ClockSource: Send + Debug {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Resolution of the sub-second part of every sample.
    fn unit(&self) -> SubsecondUnit;

    /// Whether successive samples never go backwards.
    fn is_monotonic(&self) -> bool;

    /// Sample the current time.
    fn sample(&self) -> Result<Timestamp, TimingError>;
}

impl<C: ClockSource + ?Sized> ClockSource for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn unit(&self) -> SubsecondUnit {
        (**self).unit()
    }

    fn is_monotonic(&self) -> bool {
        (**self).is_monotonic()
    }

    fn sample(&self) -> Result<Timestamp, TimingError> {
        (**self).sample()
    }
}
