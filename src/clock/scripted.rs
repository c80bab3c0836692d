use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use super::ClockSource;
use crate::error::TimingError;
use crate::timestamp::{SubsecondUnit, Timestamp};

/// Clock that replays queued samples in order.
///
/// Clones share the same queue, so a test can keep a handle while a board
/// owns the clock. A queued `None` makes the next sample fail as if the
/// platform clock were unavailable, as does an empty queue.
#[derive(Debug, Clone)]
pub struct ScriptedClock {
    unit: SubsecondUnit,
    queue: Arc<Mutex<VecDeque<Option<Timestamp>>>>,
}

impl ScriptedClock {
    /// Create an empty script producing timestamps in `unit`.
    pub fn new(unit: SubsecondUnit) -> Self {
        Self {
            unit,
            queue: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a script from `(secs, frac)` pairs.
    pub fn from_pairs(unit: SubsecondUnit, pairs: &[(u64, u64)]) -> Self {
        let clock = Self::new(unit);
        for &(secs, frac) in pairs {
            clock.push(secs, frac);
        }
        clock
    }

    /// Queue a successful sample.
    pub fn push(&self, secs: u64, frac: u64) {
        self.lock().push_back(Some(Timestamp {
            secs,
            frac,
            unit: self.unit,
        }));
    }

    /// Queue a failing sample.
    pub fn push_failure(&self) {
        self.lock().push_back(None);
    }

    /// Samples still queued.
    pub fn remaining(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Option<Timestamp>>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ClockSource for ScriptedClock {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn unit(&self) -> SubsecondUnit {
        self.unit
    }

    fn is_monotonic(&self) -> bool {
        false
    }

    fn sample(&self) -> Result<Timestamp, TimingError> {
        match self.lock().pop_front() {
            Some(Some(ts)) => Ok(ts),
            Some(None) => Err(TimingError::ClockUnavailable {
                clock: "scripted",
                reason: "scripted failure".to_string(),
            }),
            None => Err(TimingError::ClockUnavailable {
                clock: "scripted",
                reason: "script exhausted".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let clock = ScriptedClock::from_pairs(SubsecondUnit::Micros, &[(1, 2), (3, 4)]);
        assert_eq!(clock.sample().unwrap(), Timestamp::from_micros(1, 2));
        assert_eq!(clock.sample().unwrap(), Timestamp::from_micros(3, 4));
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_failure_and_exhaustion() {
        let clock = ScriptedClock::new(SubsecondUnit::Nanos);
        clock.push_failure();
        assert!(clock.sample().is_err());
        assert!(clock.sample().is_err());
    }

    #[test]
    fn test_clones_share_queue() {
        let clock = ScriptedClock::new(SubsecondUnit::Nanos);
        let handle = clock.clone();
        handle.push(7, 0);
        assert_eq!(clock.sample().unwrap(), Timestamp::from_nanos(7, 0));
    }
}
