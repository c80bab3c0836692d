use super::BoardSupport;
use crate::clock::{ClockSource, HostMonotonicClock};
use crate::error::TimingError;
use crate::output::OutputFormat;
use crate::trace::debug;

/// Generic host target.
///
/// Measures with the OS monotonic clock at nanosecond resolution and prints
/// durations with an `ms` suffix. Needs no setup.
#[derive(Debug, Default)]
pub struct HostBoard {
    clock: HostMonotonicClock,
    initialised: bool,
}

impl HostBoard {
    /// Create an uninitialised host board.
    pub fn new() -> Self {
        Self {
            clock: HostMonotonicClock::new(),
            initialised: false,
        }
    }
}

impl BoardSupport for HostBoard {
    fn name(&self) -> &str {
        "host"
    }

    fn initialise(&mut self) -> Result<(), TimingError> {
        if !self.initialised {
            debug!(board = "host", "board initialised");
            self.initialised = true;
        }
        Ok(())
    }

    fn is_initialised(&self) -> bool {
        self.initialised
    }

    fn clock(&self) -> &dyn ClockSource {
        &self.clock
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat::WithUnit
    }
}
