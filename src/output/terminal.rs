//! Terminal summary of a harness run.

use colored::Colorize;

use crate::output::format_general;
use crate::report::RunReport;

/// Format a RunReport for human-readable terminal output.
///
/// Intended for stderr; stdout is reserved for the duration lines.
pub fn format_report(report: &RunReport) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("board-timing\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!("  Board: {}\n", report.board.bold()));
    output.push_str(&format!(
        "  Clock: {} ({}, {})\n",
        report.clock,
        report.unit.suffix(),
        if report.monotonic {
            "monotonic".green().to_string()
        } else {
            "wall clock".yellow().to_string()
        }
    ));
    output.push_str(&format!(
        "  Iterations: {} (warmup {})\n",
        report.summary.count, report.warmup
    ));
    output.push('\n');

    let s = &report.summary;
    output.push_str(&format!("    Median: {} ms\n", format_general(s.median_ms).bold()));
    output.push_str(&format!("    Mean:   {} ms\n", format_general(s.mean_ms)));
    output.push_str(&format!(
        "    Range:  {} \u{2013} {} ms\n",
        format_general(s.min_ms),
        format_general(s.max_ms)
    ));

    if report.measurements.iter().any(|m| m.duration_ms < 0.0) {
        output.push('\n');
        output.push_str(&format!(
            "  {}\n",
            "\u{26A0} Clock stepped backwards during the run".yellow().bold()
        ));
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');
    output.push_str(&format!("Total runtime: {:.3} s\n", report.runtime_secs));

    output
}
