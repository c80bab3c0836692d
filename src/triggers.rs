//! Process-wide parameterless trigger contract.
//!
//! Benchmark programs written against the classic board-support interface
//! call `initialise`, `start_trigger` and `stop_trigger` without passing any
//! state. This module keeps one board and one [`Session`] for the process so
//! those calls have somewhere to record the start point. Code that can pass
//! state around should use a board and its own sessions directly.
//!
//! The board comes from [`Config::from_env`] on first use unless one was
//! [`install`]ed.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use crate::board::{create_board, BoardSupport};
use crate::config::Config;
use crate::error::TimingError;
use crate::output::{emit_line, OutputFormat};
use crate::session::{Measurement, Session};
use crate::trace::debug;

struct Backend {
    board: Box<dyn BoardSupport>,
    session: Session,
    format: OutputFormat,
}

impl Backend {
    fn new(board: Box<dyn BoardSupport>, format: Option<OutputFormat>) -> Self {
        let format = format.unwrap_or_else(|| board.output_format());
        Self {
            board,
            session: Session::new(),
            format,
        }
    }

    fn from_config(config: &Config) -> Self {
        debug!(board = %config.board, "selecting board from configuration");
        Self::new(create_board(config), config.output_format)
    }
}

static BACKEND: OnceLock<Mutex<Option<Backend>>> = OnceLock::new();

fn lock() -> MutexGuard<'static, Option<Backend>> {
    BACKEND
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn with_backend<R>(
    f: impl FnOnce(&mut Backend) -> Result<R, TimingError>,
) -> Result<R, TimingError> {
    let mut guard = lock();
    let backend = guard.get_or_insert_with(|| Backend::from_config(&Config::from_env()));
    f(backend)
}

/// Use `board` for all subsequent triggers, printing in its own format.
///
/// Replaces any previous board and forgets the recorded start point.
pub fn install(board: impl BoardSupport + 'static) {
    install_boxed(Box::new(board), None);
}

/// Use `board` for all subsequent triggers, optionally overriding its format.
pub fn install_boxed(board: Box<dyn BoardSupport>, format: Option<OutputFormat>) {
    *lock() = Some(Backend::new(board, format));
}

/// Drop the process-wide board; the next call selects one from the environment again.
pub fn reset() {
    *lock() = None;
}

/// Name of the active board, if one has been selected.
pub fn active_board() -> Option<String> {
    lock().as_ref().map(|b| b.board.name().to_string())
}

/// Prepare the board. Safe to call any number of times.
#[inline(never)]
pub fn initialise() -> Result<(), TimingError> {
    with_backend(|backend| backend.board.initialise())
}

/// Record the start of the measured interval.
///
/// Initialises the board first if the harness did not.
#[inline(never)]
pub fn start_trigger() -> Result<(), TimingError> {
    with_backend(|backend| {
        backend.board.initialise()?;
        backend.board.start_trigger(&mut backend.session)
    })
}

/// Measure since the last start and print the duration line to stdout.
#[inline(never)]
pub fn stop_trigger() -> Result<Measurement, TimingError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    stop_trigger_to(&mut out)
}

/// Measure since the last start and print the duration line to `out`.
pub fn stop_trigger_to(out: &mut dyn Write) -> Result<Measurement, TimingError> {
    with_backend(|backend| {
        let measurement = backend.board.stop_trigger(&backend.session)?;
        emit_line(out, measurement.duration_ms, backend.format)?;
        Ok(measurement)
    })
}
