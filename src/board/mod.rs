//! Board-support backends.
//!
//! A board ties a [`ClockSource`] to an output format and any setup the
//! target needs before timing. The trigger bodies are shared: every board
//! measures through a caller-owned [`Session`] inside an instrumentation point.
//!
//! | Target | Clock | Output |
//! |---|---|---|
//! | [`BoardTarget::Host`] | host monotonic, ns | `750ms` |
//! | [`BoardTarget::RocketVerilator`] | wall clock, µs | `750` |
//! | [`BoardTarget::CycleCounter`] | CPU counter, ns | `750` |

mod custom;
mod cycles;
mod host;
mod rocket;

use std::fmt::{self, Debug};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clock::ClockSource;
use crate::config::Config;
use crate::error::TimingError;
use crate::instrument::{instrument, Instrumentation, Marker};
use crate::output::OutputFormat;
use crate::session::{Measurement, Session};

pub use custom::CustomBoard;
pub use cycles::CycleCounterBoard;
pub use host::HostBoard;
pub use rocket::RocketVerilatorBoard;

/// The timing contract every board backend satisfies.
pub trait BoardSupport: Send + Debug {
    /// Backend name used in logs and reports.
    fn name(&self) -> &str;

    /// Prepare the board for timing.
    ///
    /// Idempotent, and never touches a session.
    fn initialise(&mut self) -> Result<(), TimingError>;

    /// Whether `initialise` has completed.
    fn is_initialised(&self) -> bool;

    /// The clock this board measures with.
    fn clock(&self) -> &dyn ClockSource;

    /// Format of the line emitted after each stop.
    fn output_format(&self) -> OutputFormat;

    /// How the triggers are emitted.
    fn instrumentation(&self) -> Instrumentation {
        Instrumentation::Boundary
    }

    /// Record the start of an interval in `session`.
    fn start_trigger(&self, session: &mut Session) -> Result<(), TimingError> {
        instrument(self.instrumentation(), Marker::Start, || {
            session.start(self.clock()).map(|_| ())
        })
    }

    /// Measure the interval recorded in `session`.
    fn stop_trigger(&self, session: &Session) -> Result<Measurement, TimingError> {
        instrument(self.instrumentation(), Marker::Stop, || {
            session.stop(self.clock())
        })
    }
}

/// Board backends selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardTarget {
    /// Generic host: OS monotonic clock.
    #[default]
    Host,
    /// Simulated RISC-V (Rocket core under Verilator): `gettimeofday` clock.
    RocketVerilator,
    /// Raw CPU counter at a configured or calibrated frequency.
    CycleCounter,
}

impl BoardTarget {
    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            BoardTarget::Host => "host",
            BoardTarget::RocketVerilator => "rocketverilator",
            BoardTarget::CycleCounter => "cycles",
        }
    }
}

impl fmt::Display for BoardTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoardTarget {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" | "none" | "default" | "x64" | "x86_64" => Ok(BoardTarget::Host),
            "rocketverilator" | "rocket-verilator" | "riscv64" => Ok(BoardTarget::RocketVerilator),
            "cycles" | "cycle-counter" | "counter" => Ok(BoardTarget::CycleCounter),
            other => Err(TimingError::UnknownBoard(other.to_string())),
        }
    }
}

/// Build the board `config` selects. The board is not yet initialised.
pub fn create_board(config: &Config) -> Box<dyn BoardSupport> {
    match config.board {
        BoardTarget::Host => Box::new(HostBoard::new()),
        BoardTarget::RocketVerilator => Box::new(RocketVerilatorBoard::new()),
        BoardTarget::CycleCounter => Box::new(CycleCounterBoard::new(config.cpu_mhz)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_names_round_trip() {
        for target in [
            BoardTarget::Host,
            BoardTarget::RocketVerilator,
            BoardTarget::CycleCounter,
        ] {
            assert_eq!(target.name().parse::<BoardTarget>().unwrap(), target);
        }
    }

    #[test]
    fn test_target_aliases() {
        assert_eq!("none".parse::<BoardTarget>().unwrap(), BoardTarget::Host);
        assert_eq!(
            "RISCV64".parse::<BoardTarget>().unwrap(),
            BoardTarget::RocketVerilator
        );
        assert!(matches!(
            "pdp11".parse::<BoardTarget>(),
            Err(TimingError::UnknownBoard(name)) if name == "pdp11"
        ));
    }

    #[test]
    fn test_create_board_matches_target() {
        let config = Config {
            board: BoardTarget::RocketVerilator,
            ..Config::default()
        };
        let board = create_board(&config);
        assert_eq!(board.name(), "rocketverilator");
        assert_eq!(board.output_format(), OutputFormat::Plain);
        assert!(!board.is_initialised());
    }
}
