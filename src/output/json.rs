//! JSON serialization for run reports.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::TimingError;
use crate::report::RunReport;

/// Indented JSON, the form [`write_report`] puts on disk.
pub fn to_json_pretty(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Write `report` as pretty JSON to `path`, creating parent directories.
pub fn write_report(path: &Path, report: &RunReport) -> Result<(), TimingError> {
    let io_err = |source: io::Error| TimingError::ReportIo {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let mut text = to_json_pretty(report).map_err(|err| io_err(io::Error::other(err)))?;
    text.push('\n');
    fs::write(path, text).map_err(io_err)
}
