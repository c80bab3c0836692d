use std::time::{SystemTime, UNIX_EPOCH};

use super::ClockSource;
use crate::error::TimingError;
use crate::timestamp::{SubsecondUnit, Timestamp};

/// Wall-clock time since the Unix epoch with microsecond resolution.
///
/// Mirrors `gettimeofday`, which is the only clock a simulated RISC-V target
/// running under a proxy kernel can reach. Not monotonic: the host may step it.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl WallClock {
    /// Create a wall clock.
    pub fn new() -> Self {
        Self
    }
}

impl ClockSource for WallClock {
    fn name(&self) -> &'static str {
        "wall"
    }

    fn unit(&self) -> SubsecondUnit {
        SubsecondUnit::Micros
    }

    fn is_monotonic(&self) -> bool {
        false
    }

    fn sample(&self) -> Result<Timestamp, TimingError> {
        let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|err| {
            TimingError::ClockUnavailable {
                clock: "wall",
                reason: format!("system time is {:?} before the Unix epoch", err.duration()),
            }
        })?;

        Ok(Timestamp::from_micros(
            since_epoch.as_secs(),
            u64::from(since_epoch.subsec_micros()),
        ))
    }
}
