//! Tests for the exported C entry points.

#![cfg(feature = "c-abi")]

use std::env;
use std::process::Command;
use std::sync::{Mutex, MutexGuard};

use board_timing::board::CustomBoard;
use board_timing::clock::ScriptedClock;
use board_timing::{ffi, triggers, SubsecondUnit};

/// The exports share one process-wide board; tests in this binary take turns.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// Set in the child process that is expected to abort.
const ABORT_CHILD: &str = "BOARD_TIMING_FFI_ABORT_CHILD";

#[test]
fn stop_without_start_returns_and_samples_nothing() {
    let _guard = serial();
    let clock = ScriptedClock::from_pairs(SubsecondUnit::Micros, &[(10, 0), (10, 500_000)]);
    triggers::install(CustomBoard::new("sim", clock.clone()));

    ffi::stop_trigger();
    assert_eq!(clock.remaining(), 2);

    ffi::initialise_board();
    ffi::start_trigger();
    ffi::stop_trigger();
    assert_eq!(clock.remaining(), 0);
}

#[test]
fn repeated_stop_reuses_start_point() {
    let _guard = serial();
    let clock = ScriptedClock::from_pairs(SubsecondUnit::Nanos, &[(1, 0), (2, 0), (3, 0)]);
    triggers::install(CustomBoard::new("sim", clock.clone()));

    ffi::start_trigger();
    ffi::stop_trigger();
    ffi::stop_trigger();
    assert_eq!(clock.remaining(), 0);
}

#[test]
fn clock_failure_aborts_process() {
    if env::var_os(ABORT_CHILD).is_some() {
        let clock = ScriptedClock::new(SubsecondUnit::Nanos);
        clock.push_failure();
        triggers::install(CustomBoard::new("broken", clock));
        ffi::start_trigger();
        // Only reached if the failure was not treated as fatal.
        std::process::exit(0);
    }

    let exe = env::current_exe().unwrap();
    let output = Command::new(exe)
        .args(["clock_failure_aborts_process", "--exact", "--nocapture"])
        .env(ABORT_CHILD, "1")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("board-timing: fatal: clock"), "stderr: {stderr}");
}
