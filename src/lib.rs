//! # board-timing
//!
//! Board-support timing hooks for benchmark harnesses.
//!
//! A benchmark harness brackets each run of a workload with a start and a
//! stop trigger; the board backend samples its clock at both points and
//! prints the elapsed milliseconds as a single `%g` line on stdout:
//!
//! ```text
//! initialise()            once
//! start_trigger()         ┐
//! <workload>              │ per iteration
//! stop_trigger()  → "750" ┘
//! ```
//!
//! The crate splits that contract into independent pieces:
//! - [`clock`]: one [`ClockSource`] per target environment (host monotonic,
//!   simulated-target wall clock, CPU counter)
//! - [`Session`]: caller-owned measurement state; stopping a session that was
//!   never started is an error, not a garbage duration
//! - [`board`]: backends combining a clock, an output format and target setup
//! - [`instrument`]: triggers stay real call boundaries for external probes
//! - [`triggers`] / `ffi`: the classic parameterless interface
//! - [`Harness`]: warmup plus repeated runs with a JSON/terminal report
//!
//! ## Quick Start
//!
//! ```ignore
//! use board_timing::{board::HostBoard, BoardSupport, Session};
//!
//! let mut board = HostBoard::new();
//! board.initialise()?;
//!
//! let mut session = Session::new();
//! board.start_trigger(&mut session)?;
//! run_benchmark();
//! let measurement = board.stop_trigger(&session)?;
//!
//! println!("{}", board.output_format().render(measurement.duration_ms));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod harness;
mod report;
mod session;
mod timestamp;
mod trace;

// Functional modules
pub mod board;
pub mod clock;
pub mod instrument;
pub mod output;
pub mod triggers;

#[cfg(feature = "c-abi")]
pub mod ffi;

// Re-exports for public API
pub use board::{create_board, BoardSupport, BoardTarget};
pub use clock::ClockSource;
pub use config::Config;
pub use error::TimingError;
pub use harness::Harness;
pub use output::OutputFormat;
pub use report::{RunReport, Summary};
pub use session::{Measurement, Session};
pub use timestamp::{duration_ms, SubsecondUnit, Timestamp};
pub use trace::init_tracing;
