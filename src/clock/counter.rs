//! Raw CPU counter clock.
//!
//! Reads the cheapest free-running counter the architecture offers:
//! - x86_64: `lfence; rdtsc` with compiler fences
//! - aarch64: `isb; mrs cntvct_el0`
//! - riscv64: `rdtime`
//! - Fallback: nanoseconds since a process-wide `Instant`
//!
//! Counter ticks become timestamps through a frequency that is either known
//! up front (`cntfrq_el0`, the fallback's 1 GHz, a configured clock speed) or
//! calibrated against the host clock.

use std::time::{Duration, Instant};

use super::ClockSource;
use crate::error::TimingError;
use crate::timestamp::{SubsecondUnit, Timestamp};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Read the architecture's free-running counter.
#[inline]
pub fn read_counter() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        read_counter_x86_64()
    }

    #[cfg(target_arch = "aarch64")]
    {
        read_counter_aarch64()
    }

    #[cfg(target_arch = "riscv64")]
    {
        read_counter_riscv64()
    }

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "riscv64"
    )))]
    {
        read_counter_fallback()
    }
}

#[cfg(target_arch = "x86_64")]
#[inline]
fn read_counter_x86_64() -> u64 {
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

    let ticks: u64;
    // SAFETY: lfence and rdtsc have no memory effects; rdx is declared clobbered.
    unsafe {
        std::arch::asm!(
            "lfence",
            "rdtsc",
            "shl rdx, 32",
            "or rax, rdx",
            out("rax") ticks,
            out("rdx") _,
            options(nostack, nomem),
        );
    }

    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    ticks
}

#[cfg(target_arch = "aarch64")]
#[inline]
fn read_counter_aarch64() -> u64 {
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

    let ticks: u64;
    // SAFETY: reading the virtual counter is permitted at EL0 and has no side effects.
    unsafe {
        std::arch::asm!(
            "isb",
            "mrs {}, cntvct_el0",
            out(reg) ticks,
            options(nostack, nomem),
        );
    }

    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    ticks
}

#[cfg(target_arch = "riscv64")]
#[inline]
fn read_counter_riscv64() -> u64 {
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

    let ticks: u64;
    // SAFETY: rdtime reads the time CSR and has no side effects.
    unsafe {
        std::arch::asm!("rdtime {}", out(reg) ticks, options(nostack, nomem));
    }

    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    ticks
}

#[cfg(not(any(
    target_arch = "x86_64",
    target_arch = "aarch64",
    target_arch = "riscv64"
)))]
#[inline]
fn read_counter_fallback() -> u64 {
    use std::sync::OnceLock;
    static START: OnceLock<Instant> = OnceLock::new();

    let start = START.get_or_init(Instant::now);
    start.elapsed().as_nanos() as u64
}

/// Counter frequency in Hz when the platform reports it.
///
/// aarch64 publishes it in `cntfrq_el0`; the fallback counter already counts
/// nanoseconds. x86 TSC and RISC-V `time` rates must be configured or calibrated.
pub fn native_frequency_hz() -> Option<u64> {
    #[cfg(target_arch = "aarch64")]
    {
        let freq: u64;
        // SAFETY: cntfrq_el0 is readable at EL0 and has no side effects.
        unsafe {
            std::arch::asm!("mrs {}, cntfrq_el0", out(reg) freq, options(nostack, nomem));
        }
        if freq == 0 {
            None
        } else {
            Some(freq)
        }
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "riscv64"))]
    {
        None
    }

    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "aarch64",
        target_arch = "riscv64"
    )))]
    {
        Some(1_000_000_000)
    }
}

/// Calibrate the counter against `Instant`, returning ticks per nanosecond.
///
/// Runs `rounds` short sleeps and takes the median tick/ns ratio.
pub fn calibrate_ticks_per_ns(rounds: usize, sleep: Duration) -> Result<f64, TimingError> {
    let mut ratios = Vec::with_capacity(rounds);

    for _ in 0..rounds {
        let start_ticks = read_counter();
        let start_time = Instant::now();

        std::thread::sleep(sleep);

        let end_ticks = read_counter();
        let elapsed_nanos = start_time.elapsed().as_nanos() as u64;

        if elapsed_nanos == 0 {
            continue;
        }

        let ticks = end_ticks.saturating_sub(start_ticks);
        if ticks > 0 {
            ratios.push(ticks as f64 / elapsed_nanos as f64);
        }
    }

    if ratios.is_empty() {
        return Err(TimingError::Calibration(
            "counter did not advance during calibration".to_string(),
        ));
    }

    ratios.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = ratios.len() / 2;
    let median = if ratios.len() % 2 == 0 {
        (ratios[mid - 1] + ratios[mid]) / 2.0
    } else {
        ratios[mid]
    };
    Ok(median)
}

/// Clock built on [`read_counter`], reporting nanoseconds.
///
/// Seconds count from an arbitrary counter origin (boot or reset on most
/// platforms). Samples fail until a frequency is known.
#[derive(Debug, Clone)]
pub struct CycleCounterClock {
    /// Counter ticks per second.
    frequency_hz: Option<u64>,
}

impl CycleCounterClock {
    /// Clock using the platform-reported frequency, if any.
    pub fn new() -> Self {
        Self {
            frequency_hz: native_frequency_hz(),
        }
    }

    /// Clock with a known counter frequency.
    pub fn with_frequency_hz(frequency_hz: u64) -> Self {
        Self {
            frequency_hz: (frequency_hz > 0).then_some(frequency_hz),
        }
    }

    /// Counter ticks per second, once known.
    pub fn frequency_hz(&self) -> Option<u64> {
        self.frequency_hz
    }

    /// Determine the frequency by calibration unless it is already known.
    ///
    /// Returns the frequency in effect afterwards.
    pub fn calibrate(&mut self) -> Result<u64, TimingError> {
        if let Some(freq) = self.frequency_hz {
            return Ok(freq);
        }

        let ticks_per_ns = calibrate_ticks_per_ns(21, Duration::from_millis(1))?;
        let freq = (ticks_per_ns * 1.0e9).round() as u64;
        if freq == 0 {
            return Err(TimingError::Calibration(format!(
                "implausible counter rate {ticks_per_ns} ticks/ns"
            )));
        }
        self.frequency_hz = Some(freq);
        Ok(freq)
    }

    /// Convert a raw counter value into a timestamp.
    pub fn ticks_to_timestamp(&self, ticks: u64) -> Result<Timestamp, TimingError> {
        let freq = self.frequency_hz.ok_or_else(|| TimingError::ClockUnavailable {
            clock: "cycles",
            reason: "counter frequency unknown; initialise the board first".to_string(),
        })?;

        let nanos = u128::from(ticks) * NANOS_PER_SEC / u128::from(freq);
        Ok(Timestamp::from_nanos(
            (nanos / NANOS_PER_SEC) as u64,
            (nanos % NANOS_PER_SEC) as u64,
        ))
    }
}

impl Default for CycleCounterClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for CycleCounterClock {
    fn name(&self) -> &'static str {
        "cycles"
    }

    fn unit(&self) -> SubsecondUnit {
        SubsecondUnit::Nanos
    }

    fn is_monotonic(&self) -> bool {
        true
    }

    #[inline]
    fn sample(&self) -> Result<Timestamp, TimingError> {
        self.ticks_to_timestamp(read_counter())
    }
}
