use std::sync::OnceLock;
use std::time::Instant;

use super::ClockSource;
use crate::error::TimingError;
use crate::timestamp::{SubsecondUnit, Timestamp};

/// Process-wide reference point so samples from different clock values compare.
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Host OS monotonic clock with nanosecond resolution.
///
/// Seconds count from the first time any `HostMonotonicClock` was created or
/// sampled in this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostMonotonicClock;

impl HostMonotonicClock {
    /// Create the clock and pin the process epoch.
    pub fn new() -> Self {
        EPOCH.get_or_init(Instant::now);
        Self
    }
}

impl ClockSource for HostMonotonicClock {
    fn name(&self) -> &'static str {
        "monotonic"
    }

    fn unit(&self) -> SubsecondUnit {
        SubsecondUnit::Nanos
    }

    fn is_monotonic(&self) -> bool {
        true
    }

    #[inline]
    fn sample(&self) -> Result<Timestamp, TimingError> {
        let elapsed = EPOCH.get_or_init(Instant::now).elapsed();
        Ok(Timestamp::from_nanos(
            elapsed.as_secs(),
            u64::from(elapsed.subsec_nanos()),
        ))
    }
}
