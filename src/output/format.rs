//! Rendering of the duration line written after each stop trigger.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimingError;

/// Significant digits printed by C's `%g` without an explicit precision.
const GENERAL_PRECISION: i32 = 6;

/// Shape of the duration line.
///
/// Board backends historically disagreed: the simulated RISC-V board prints
/// the bare number, the host board appends `ms`. Consumers should accept both
/// (see [`decode_duration`](super::decode_duration)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `%g` value alone, e.g. `500`.
    #[default]
    Plain,
    /// `%g` value followed by `ms`, e.g. `500ms`.
    WithUnit,
}

impl OutputFormat {
    /// Render `duration_ms` without a trailing newline.
    pub fn render(self, duration_ms: f64) -> String {
        let value = format_general(duration_ms);
        match self {
            OutputFormat::Plain => value,
            OutputFormat::WithUnit => format!("{value}ms"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => f.write_str("plain"),
            OutputFormat::WithUnit => f.write_str("ms"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "g" | "%g" => Ok(OutputFormat::Plain),
            "ms" | "with_unit" | "with-unit" | "%gms" => Ok(OutputFormat::WithUnit),
            other => Err(TimingError::InvalidConfig(format!(
                "unknown output format `{other}` (expected `plain` or `ms`)"
            ))),
        }
    }
}

/// Format `value` the way C's `printf("%g", value)` does.
///
/// Six significant digits, trailing zeros and a dangling decimal point
/// removed, exponent notation when the decimal exponent is below -4 or at
/// least 6. The exponent carries a sign and at least two digits.
pub fn format_general(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        let magnitude = if value.is_nan() {
            "nan"
        } else if value.is_infinite() {
            "inf"
        } else {
            "0"
        };
        let sign = if value.is_sign_negative() { "-" } else { "" };
        return format!("{sign}{magnitude}");
    }

    // The exponent is decided after rounding to the target precision, so
    // 999999.5 becomes 1e+06 rather than 1000000.
    let scientific = format!("{:.*e}", (GENERAL_PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= GENERAL_PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (GENERAL_PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Write one duration line to `out` and flush it.
pub fn emit_line(
    out: &mut dyn Write,
    duration_ms: f64,
    format: OutputFormat,
) -> Result<(), TimingError> {
    writeln!(out, "{}", format.render(duration_ms))?;
    out.flush()?;
    Ok(())
}
