//! Results of a harness run.

use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::session::Measurement;
use crate::timestamp::SubsecondUnit;

/// Complete record of one [`Harness`](crate::Harness) run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Board backend name.
    pub board: String,
    /// Clock provider name.
    pub clock: String,
    /// Sub-second resolution of the clock.
    pub unit: SubsecondUnit,
    /// Whether the clock guarantees non-decreasing samples.
    pub monotonic: bool,
    /// Format of the emitted duration lines.
    pub output_format: OutputFormat,
    /// Untimed workload calls before the first trigger.
    pub warmup: usize,
    /// One entry per bracketed iteration, in order.
    pub measurements: Vec<Measurement>,
    /// Aggregate over `measurements`.
    pub summary: Summary,
    /// Wall time of the whole run including warmup, in seconds.
    pub runtime_secs: f64,
}

impl RunReport {
    /// Per-iteration durations in milliseconds.
    pub fn durations_ms(&self) -> Vec<f64> {
        self.measurements.iter().map(|m| m.duration_ms).collect()
    }
}

/// Order statistics over a set of durations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Number of durations.
    pub count: usize,
    /// Smallest duration (ms).
    pub min_ms: f64,
    /// Largest duration (ms).
    pub max_ms: f64,
    /// Arithmetic mean (ms).
    pub mean_ms: f64,
    /// Median (ms); mean of the two middle values for even counts.
    pub median_ms: f64,
}

impl Summary {
    /// Summarise `durations`. An empty slice yields all zeros.
    pub fn from_durations(durations: &[f64]) -> Self {
        if durations.is_empty() {
            return Self::default();
        }

        let mut sorted = durations.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = sorted.len();
        let mid = count / 2;
        let median_ms = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Self {
            count,
            min_ms: sorted[0],
            max_ms: sorted[count - 1],
            mean_ms: sorted.iter().sum::<f64>() / count as f64,
            median_ms,
        }
    }
}
