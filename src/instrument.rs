//! Instrumentation points.
//!
//! External measurement equipment (a simulator watching the program counter,
//! a logic analyser on a GPIO toggled by a breakpoint) synchronises on the
//! start and stop triggers. Those triggers therefore have to remain real
//! call/return boundaries in the emitted artifact. [`boundary`] guarantees
//! that; [`Instrumentation::Inline`] opts out for boards without such probes.

use std::hint::black_box;
use std::sync::atomic::{compiler_fence, Ordering};

use serde::{Deserialize, Serialize};

/// Which trigger an instrumentation point marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Beginning of the measured interval.
    Start,
    /// End of the measured interval.
    Stop,
}

/// How a board wants its triggers emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Instrumentation {
    /// Non-inlined call with compiler fences on both sides.
    #[default]
    Boundary,
    /// Ordinary call the optimiser may inline.
    Inline,
}

/// Run `body` inside a call boundary the compiler will not inline or reorder across.
#[inline(never)]
pub fn boundary<R>(marker: Marker, body: impl FnOnce() -> R) -> R {
    compiler_fence(Ordering::SeqCst);
    black_box(marker);
    let out = black_box(body());
    compiler_fence(Ordering::SeqCst);
    out
}

/// Run `body` as `policy` requires.
#[inline(always)]
pub fn instrument<R>(policy: Instrumentation, marker: Marker, body: impl FnOnce() -> R) -> R {
    match policy {
        Instrumentation::Boundary => boundary(marker, body),
        Instrumentation::Inline => body(),
    }
}
