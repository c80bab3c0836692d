//! Harness-side parsing of duration lines.

use crate::trace::debug;

/// Parse the stdout of a timed run into milliseconds.
///
/// Accepts both board output forms (`500` and `500ms`) with surrounding
/// whitespace. Returns `None` for anything else, including non-finite values.
pub fn decode_duration(stdout: &str) -> Option<f64> {
    let line = stdout.trim();
    let number = line.strip_suffix("ms").map(str::trim_end).unwrap_or(line);

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!(output = stdout, "could not decode duration");
            None
        }
    }
}

/// Like [`decode_duration`], reporting a failed run as `0.0`.
pub fn decode_or_zero(stdout: &str) -> f64 {
    decode_duration(stdout).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_forms() {
        assert_eq!(decode_duration("500\n"), Some(500.0));
        assert_eq!(decode_duration("750ms\n"), Some(750.0));
        assert_eq!(decode_duration("  1.23457e+06 ms "), Some(1.23457e6));
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(decode_duration(""), None);
        assert_eq!(decode_duration("Segmentation fault"), None);
        assert_eq!(decode_duration("12\n34\n"), None);
        assert_eq!(decode_duration("inf"), None);
        assert_eq!(decode_duration("nanms"), None);
    }

    #[test]
    fn test_decode_or_zero() {
        assert_eq!(decode_or_zero("oops"), 0.0);
        assert_eq!(decode_or_zero("0.5"), 0.5);
    }
}
