//! Configuration for board selection and harness runs.

use std::env;
use std::path::PathBuf;

use crate::board::BoardTarget;
use crate::error::TimingError;
use crate::output::OutputFormat;
use crate::trace::warn;

/// Environment variable selecting the board backend.
pub const ENV_BOARD: &str = "BT_BOARD";
/// Environment variable giving the processor clock in MHz.
pub const ENV_CPU_MHZ: &str = "BT_CPU_MHZ";
/// Environment variable giving the number of untimed warmup calls.
pub const ENV_WARMUP_HEAT: &str = "BT_WARMUP_HEAT";
/// Environment variable giving the number of timed iterations.
pub const ENV_ITERATIONS: &str = "BT_ITERATIONS";
/// Environment variable overriding the output line format.
pub const ENV_FORMAT: &str = "BT_FORMAT";
/// Environment variable naming a JSON report file.
pub const ENV_REPORT: &str = "BT_REPORT";

/// Configuration options for boards and the [`Harness`](crate::Harness).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Board backend (default: `Host`).
    pub board: BoardTarget,

    /// Processor clock speed in MHz.
    ///
    /// Used as the counter frequency by the cycle-counter board; when absent
    /// that board calibrates during `initialise`.
    pub cpu_mhz: Option<u32>,

    /// Untimed workload calls before the first trigger (default: 0).
    pub warmup: usize,

    /// Bracketed workload calls (default: 1).
    pub iterations: usize,

    /// Override for the board's own output format.
    pub output_format: Option<OutputFormat>,

    /// Optional JSON report destination.
    pub report_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board: BoardTarget::Host,
            cpu_mhz: None,
            warmup: 0,
            iterations: 1,
            output_format: None,
            report_path: None,
        }
    }
}

impl Config {
    /// Defaults overlaid with the `BT_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Overlay the `BT_*` environment variables onto `self`.
    pub fn merge_env(self) -> Self {
        self.merge_with(|key| env::var(key).ok())
    }

    /// Overlay values produced by `lookup`, keyed by the `BT_*` names.
    ///
    /// Values that fail to parse are ignored and logged.
    pub fn merge_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_BOARD) {
            match raw.parse::<BoardTarget>() {
                Ok(board) => self.board = board,
                Err(_err) => warn!(key = ENV_BOARD, value = %raw, error = %_err, "ignoring value"),
            }
        }
        if let Some(mhz) = parse_with(&lookup, ENV_CPU_MHZ) {
            self.cpu_mhz = Some(mhz);
        }
        if let Some(warmup) = parse_with(&lookup, ENV_WARMUP_HEAT) {
            self.warmup = warmup;
        }
        if let Some(iterations) = parse_with(&lookup, ENV_ITERATIONS) {
            self.iterations = iterations;
        }
        if let Some(raw) = lookup(ENV_FORMAT) {
            match raw.parse::<OutputFormat>() {
                Ok(format) => self.output_format = Some(format),
                Err(_err) => warn!(key = ENV_FORMAT, value = %raw, error = %_err, "ignoring value"),
            }
        }
        if let Some(path) = lookup(ENV_REPORT).filter(|p| !p.trim().is_empty()) {
            self.report_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Reject configurations a run cannot honour.
    pub fn validate(&self) -> Result<(), TimingError> {
        if self.iterations == 0 {
            return Err(TimingError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        if self.cpu_mhz == Some(0) {
            return Err(TimingError::InvalidConfig(
                "cpu_mhz must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_with<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable value");
            None
        }
    }
}
