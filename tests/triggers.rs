//! Tests for the process-wide parameterless trigger contract.

use std::sync::{Mutex, MutexGuard};

use board_timing::board::CustomBoard;
use board_timing::clock::ScriptedClock;
use board_timing::{triggers, OutputFormat, SubsecondUnit, TimingError};

/// The facade is process-wide; tests in this binary take turns.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

#[test]
fn start_stop_prints_plain_line() {
    let _guard = serial();
    let clock = ScriptedClock::from_pairs(SubsecondUnit::Micros, &[(10, 0), (10, 500_000)]);
    triggers::install(CustomBoard::new("rocket-sim", clock));

    triggers::initialise().unwrap();
    triggers::start_trigger().unwrap();
    let mut out = Vec::new();
    let m = triggers::stop_trigger_to(&mut out).unwrap();

    assert!((m.duration_ms - 500.0).abs() < 1e-9);
    assert_eq!(String::from_utf8(out).unwrap(), "500\n");
    assert_eq!(triggers::active_board().as_deref(), Some("rocket-sim"));
}

#[test]
fn format_override_appends_unit() {
    let _guard = serial();
    let clock = ScriptedClock::from_pairs(SubsecondUnit::Nanos, &[(100, 250_000_000), (101, 0)]);
    triggers::install_boxed(
        Box::new(CustomBoard::new("host-sim", clock)),
        Some(OutputFormat::WithUnit),
    );

    triggers::start_trigger().unwrap();
    let mut out = Vec::new();
    triggers::stop_trigger_to(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "750ms\n");
}

#[test]
fn stop_before_start_prints_nothing() {
    let _guard = serial();
    let clock = ScriptedClock::from_pairs(SubsecondUnit::Nanos, &[(1, 0)]);
    triggers::install(CustomBoard::new("sim", clock.clone()));

    let mut out = Vec::new();
    let err = triggers::stop_trigger_to(&mut out).unwrap_err();
    assert!(matches!(err, TimingError::NotStarted));
    assert!(out.is_empty());
    assert_eq!(clock.remaining(), 1);
}

#[test]
fn install_forgets_previous_start() {
    let _guard = serial();
    let first = ScriptedClock::from_pairs(SubsecondUnit::Nanos, &[(1, 0)]);
    triggers::install(CustomBoard::new("first", first));
    triggers::start_trigger().unwrap();

    let second = ScriptedClock::from_pairs(SubsecondUnit::Nanos, &[(2, 0)]);
    triggers::install(CustomBoard::new("second", second));
    let mut out = Vec::new();
    assert!(matches!(
        triggers::stop_trigger_to(&mut out),
        Err(TimingError::NotStarted)
    ));
}

#[test]
fn repeated_initialise_keeps_measurements_identical() {
    let _guard = serial();
    let clock = ScriptedClock::from_pairs(
        SubsecondUnit::Micros,
        &[(0, 0), (0, 1_000), (5, 0), (5, 1_000)],
    );
    triggers::install(CustomBoard::new("sim", clock));

    let mut durations = Vec::new();
    for _ in 0..2 {
        triggers::initialise().unwrap();
        triggers::initialise().unwrap();
        triggers::start_trigger().unwrap();
        let mut out = Vec::new();
        durations.push(triggers::stop_trigger_to(&mut out).unwrap().duration_ms);
    }
    assert_eq!(durations[0], durations[1]);
}

#[test]
fn clock_failure_surfaces_as_fatal() {
    let _guard = serial();
    let clock = ScriptedClock::new(SubsecondUnit::Nanos);
    clock.push_failure();
    triggers::install(CustomBoard::new("broken", clock));

    let err = triggers::start_trigger().unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn reset_falls_back_to_configured_board() {
    let _guard = serial();
    triggers::reset();
    assert_eq!(triggers::active_board(), None);

    triggers::initialise().unwrap();
    // Whatever BT_BOARD says, some built-in board is now active.
    assert!(triggers::active_board().is_some());
    triggers::reset();
}
