//! Error type for board timing operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by clocks, sessions, boards and the harness.
#[derive(Debug, Error)]
pub enum TimingError {
    /// The platform clock could not be read.
    ///
    /// Fatal for the parameterless trigger contract; there is no retry.
    #[error("clock `{clock}` unavailable: {reason}")]
    ClockUnavailable {
        /// Name of the clock provider.
        clock: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// `stop` was called on a session that was never started.
    #[error("stop requested before any start: no start timestamp recorded")]
    NotStarted,

    /// The cycle counter could not be calibrated against the host clock.
    #[error("cycle counter calibration failed: {0}")]
    Calibration(String),

    /// Board name not recognised.
    #[error("unknown board `{0}`")]
    UnknownBoard(String),

    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing the duration line failed.
    #[error("failed to write measurement: {0}")]
    Output(#[from] io::Error),

    /// Writing the JSON report failed.
    #[error("failed to write report to {}: {source}", path.display())]
    ReportIo {
        /// Path we attempted to write.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl TimingError {
    /// Whether the parameterless trigger contract must treat this as fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TimingError::ClockUnavailable { .. } | TimingError::Calibration(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_unavailable_is_fatal() {
        let err = TimingError::ClockUnavailable {
            clock: "wall",
            reason: "before epoch".to_string(),
        };
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "clock `wall` unavailable: before epoch");
    }

    #[test]
    fn test_not_started_is_not_fatal() {
        assert!(!TimingError::NotStarted.is_fatal());
    }

    #[test]
    fn test_report_io_message_includes_path() {
        let err = TimingError::ReportIo {
            path: PathBuf::from("/tmp/report.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/report.json"));
    }
}
