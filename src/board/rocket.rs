use super::BoardSupport;
use crate::clock::{ClockSource, WallClock};
use crate::error::TimingError;
use crate::output::OutputFormat;
use crate::trace::debug;

/// Rocket RISC-V core simulated under Verilator.
///
/// The simulated program runs on a proxy kernel whose only time source is
/// `gettimeofday`, so this board measures wall-clock time in microseconds
/// and prints the bare `%g` value.
#[derive(Debug, Default)]
pub struct RocketVerilatorBoard {
    clock: WallClock,
    initialised: bool,
}

impl RocketVerilatorBoard {
    /// Create an uninitialised board.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoardSupport for RocketVerilatorBoard {
    fn name(&self) -> &str {
        "rocketverilator"
    }

    fn initialise(&mut self) -> Result<(), TimingError> {
        if !self.initialised {
            debug!(board = "rocketverilator", "board initialised");
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
        OutputFormat::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::timestamp::SubsecondUnit;

    #[test]
    fn test_uses_microsecond_wall_clock() {
        let board = RocketVerilatorBoard::new();
        assert_eq!(board.clock().unit(), SubsecondUnit::Micros);
        assert!(!board.clock().is_monotonic());
    }

    #[test]
    fn test_measures_without_initialise() {
        let board = RocketVerilatorBoard::new();
        let mut session = Session::new();
        board.start_trigger(&mut session).unwrap();
        let m = board.stop_trigger(&session).unwrap();
        // Wall clocks may step, but not by a minute inside one test.
        assert!(m.duration_ms.abs() < 60_000.0);
    }
}
