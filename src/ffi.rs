//! C ABI exports of the trigger contract.
//!
//! Benchmarks built for the classic board-support interface link against
//! `initialise_board`, `start_trigger` and `stop_trigger`. Each export is an
//! unmangled, never-inlined symbol so debuggers and simulators can break on it.
//!
//! A clock failure is fatal here: there is no caller to return it to, so the
//! error goes to stderr and the process aborts.

use crate::error::TimingError;
use crate::triggers;

fn handle_error(err: TimingError) {
    if err.is_fatal() {
        eprintln!("board-timing: fatal: {err}");
        std::process::abort();
    }
    eprintln!("board-timing: {err}");
}

/// Prepare the board selected by the `BT_*` environment.
#[no_mangle]
#[inline(never)]
pub extern "C" fn initialise_board() {
    if let Err(err) = triggers::initialise() {
        handle_error(err);
    }
}

/// Record the start of the measured interval.
#[no_mangle]
#[inline(never)]
pub extern "C" fn start_trigger() {
    if let Err(err) = triggers::start_trigger() {
        handle_error(err);
    }
}

/// Print the milliseconds elapsed since `start_trigger` to stdout.
///
/// Without a preceding `start_trigger` nothing is printed to stdout and the
/// missing start is reported on stderr.
#[no_mangle]
#[inline(never)]
pub extern "C" fn stop_trigger() {
    if let Err(err) = triggers::stop_trigger() {
        handle_error(err);
    }
}
