use super::BoardSupport;
use crate::clock::{ClockSource, CycleCounterClock};
use crate::error::TimingError;
use crate::output::OutputFormat;
use crate::trace::info;

/// Board timing with the raw CPU counter.
///
/// With a configured clock speed the counter frequency is known up front.
/// Otherwise `initialise` calibrates it against the host clock once; the
/// triggers fail with `ClockUnavailable` until then unless the platform
/// reports its counter frequency itself.
#[derive(Debug)]
pub struct CycleCounterBoard {
    clock: CycleCounterClock,
    initialised: bool,
}

impl CycleCounterBoard {
    /// Create a board, taking the counter frequency from `cpu_mhz` when given.
    pub fn new(cpu_mhz: Option<u32>) -> Self {
        let clock = match cpu_mhz {
            Some(mhz) => CycleCounterClock::with_frequency_hz(u64::from(mhz) * 1_000_000),
            None => CycleCounterClock::new(),
        };
        Self {
            clock,
            initialised: false,
        }
    }

    /// Counter frequency in Hz, once known.
    pub fn frequency_hz(&self) -> Option<u64> {
        self.clock.frequency_hz()
    }
}

impl BoardSupport for CycleCounterBoard {
    fn name(&self) -> &str {
        "cycles"
    }

    fn initialise(&mut self) -> Result<(), TimingError> {
        if self.initialised {
            return Ok(());
        }
        let _freq = self.clock.calibrate()?;
        info!(board = "cycles", frequency_hz = _freq, "counter frequency established");
        self.initialised = true;
        Ok(())
    }

    fn is_initialised(&self) -> bool {
        self.initialised
    }

    fn clock(&self) -> &dyn ClockSource {
        &self.clock
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat::Plain
    }
}
