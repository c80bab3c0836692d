//! Benchmark harness driving a board through repeated bracketed runs.

use std::hint::black_box;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use crate::board::{create_board, BoardSupport, BoardTarget};
use crate::config::Config;
use crate::error::TimingError;
use crate::output::{emit_line, write_report, OutputFormat};
use crate::report::{RunReport, Summary};
use crate::session::Session;
use crate::trace::{debug, info};

/// Runs a workload between start and stop triggers.
///
/// # Example
///
/// ```ignore
/// use board_timing::{BoardTarget, Harness};
///
/// let report = Harness::new()
///     .target(BoardTarget::Host)
///     .warmup(2)
///     .iterations(10)
///     .run(|| my_benchmark())?;
///
/// println!("median: {} ms", report.summary.median_ms);
/// ```
///
/// Each iteration prints one duration line, exactly as a board-support
/// backend would, so existing result scrapers keep working.
#[derive(Debug, Default)]
pub struct Harness {
    config: Config,
    board: Option<Box<dyn BoardSupport>>,
}

impl Harness {
    /// Create with default configuration (host board, one iteration).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an explicit configuration.
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            board: None,
        }
    }

    /// Create from defaults overlaid with the `BT_*` environment.
    pub fn from_env() -> Self {
        Self::from_config(Config::from_env())
    }

    /// Select a built-in board backend.
    pub fn target(mut self, target: BoardTarget) -> Self {
        self.config.board = target;
        self.board = None;
        self
    }

    /// Use a specific board instance instead of a built-in backend.
    pub fn board(mut self, board: impl BoardSupport + 'static) -> Self {
        self.board = Some(Box::new(board));
        self
    }

    /// Set the number of timed iterations.
    pub fn iterations(mut self, n: usize) -> Self {
        self.config.iterations = n;
        self
    }

    /// Set the number of untimed warmup calls.
    pub fn warmup(mut self, n: usize) -> Self {
        self.config.warmup = n;
        self
    }

    /// Set the processor clock speed used by the cycle-counter board.
    pub fn cpu_mhz(mut self, mhz: u32) -> Self {
        self.config.cpu_mhz = Some(mhz);
        self
    }

    /// Override the board's output format.
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = Some(format);
        self
    }

    /// Write a JSON report to `path` after the run.
    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.report_path = Some(path.into());
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `workload`, printing duration lines to stdout.
    pub fn run<F, T>(self, workload: F) -> Result<RunReport, TimingError>
    where
        F: FnMut() -> T,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(workload, &mut out)
    }

    /// Run `workload`, printing duration lines to `out`.
    ///
    /// 1. Initialises the board
    /// 2. Calls the workload `warmup` times untimed
    /// 3. Brackets `iterations` calls with start/stop triggers, emitting a line each
    /// 4. Writes the JSON report if a path is configured
    pub fn run_with_output<F, T>(
        self,
        mut workload: F,
        out: &mut dyn Write,
    ) -> Result<RunReport, TimingError>
    where
        F: FnMut() -> T,
    {
        self.config.validate()?;
        let Harness { config, board } = self;

        let mut board = board.unwrap_or_else(|| create_board(&config));
        let format = config.output_format.unwrap_or_else(|| board.output_format());
        let run_start = Instant::now();

        board.initialise()?;
        info!(
            board = board.name(),
            clock = board.clock().name(),
            iterations = config.iterations,
            warmup = config.warmup,
            "starting run"
        );

        for _ in 0..config.warmup {
            black_box(workload());
        }

        let mut session = Session::new();
        let mut measurements = Vec::with_capacity(config.iterations);
        for _iteration in 0..config.iterations {
            board.start_trigger(&mut session)?;
            black_box(workload());
            let measurement = board.stop_trigger(&session)?;

            emit_line(out, measurement.duration_ms, format)?;
            debug!(iteration = _iteration, duration_ms = measurement.duration_ms, "iteration done");
            measurements.push(measurement);
        }

        let durations: Vec<f64> = measurements.iter().map(|m| m.duration_ms).collect();
        let clock = board.clock();
        let report = RunReport {
            board: board.name().to_string(),
            clock: clock.name().to_string(),
            unit: clock.unit(),
            monotonic: clock.is_monotonic(),
            output_format: format,
            warmup: config.warmup,
            summary: Summary::from_durations(&durations),
            measurements,
            runtime_secs: run_start.elapsed().as_secs_f64(),
        };

        if let Some(path) = &config.report_path {
            write_report(path, &report)?;
            info!(path = %path.display(), "report written");
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CustomBoard;
    use crate::clock::ScriptedClock;
    use crate::timestamp::SubsecondUnit;

    #[test]
    fn test_run_emits_one_line_per_iteration() {
        let clock = ScriptedClock::from_pairs(
            SubsecondUnit::Micros,
            &[(10, 0), (10, 500_000), (20, 0), (20, 250_000)],
        );
        let mut out = Vec::new();
        let report = Harness::new()
            .board(CustomBoard::new("sim", clock))
            .iterations(2)
            .run_with_output(|| (), &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "500\n250\n");
        assert_eq!(report.durations_ms(), vec![500.0, 250.0]);
        assert_eq!(report.summary.count, 2);
        assert_eq!(report.board, "sim");
        assert_eq!(report.clock, "scripted");
    }

    #[test]
    fn test_warmup_calls_are_untimed() {
        let clock = ScriptedClock::from_pairs(SubsecondUnit::Nanos, &[(0, 0), (0, 1_000_000)]);
        let mut calls = 0;
        let mut out = Vec::new();
        let report = Harness::new()
            .board(CustomBoard::new("sim", clock.clone()))
            .warmup(3)
            .run_with_output(|| calls += 1, &mut out)
            .unwrap();

        assert_eq!(calls, 4);
        assert_eq!(report.warmup, 3);
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_format_override() {
        let clock =
            ScriptedClock::from_pairs(SubsecondUnit::Nanos, &[(100, 250_000_000), (101, 0)]);
        let mut out = Vec::new();
        Harness::new()
            .board(CustomBoard::new("sim", clock))
            .output_format(OutputFormat::WithUnit)
            .run_with_output(|| (), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "750ms\n");
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut out = Vec::new();
        let err = Harness::new()
            .iterations(0)
            .run_with_output(|| (), &mut out)
            .unwrap_err();
        assert!(matches!(err, TimingError::InvalidConfig(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_clock_failure_propagates() {
        let clock = ScriptedClock::new(SubsecondUnit::Nanos);
        clock.push(0, 0);
        clock.push_failure();
        let mut out = Vec::new();
        let err = Harness::new()
            .board(CustomBoard::new("sim", clock))
            .run_with_output(|| (), &mut out)
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(out.is_empty());
    }
}
