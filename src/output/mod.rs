//! Output formatting and decoding.
//!
//! - `format`: the `%g` duration line each stop trigger emits
//! - `decode`: harness-side parsing of that line
//! - `json`: machine-readable run reports
//! - `terminal`: colored run summaries

mod decode;
mod format;
pub mod json;
pub mod terminal;

pub use decode::{decode_duration, decode_or_zero};
pub use format::{emit_line, format_general, OutputFormat};
pub use json::{to_json_pretty, write_report};
pub use terminal::format_report;
