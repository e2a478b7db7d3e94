/// Byte-count formatting — human-readable sizes for `space` counters.
///
/// Counters animate through fractional values, so the input is `f64`.
/// Units are binary (1024) with the short labels users expect.
use crate::error::{PanelError, Result};

/// Unit labels, smallest first. Anything at or beyond 1024^8 stays in `YB`.
pub const BYTE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Decimal places used when a caller has no preference.
pub const DEFAULT_DECIMALS: i32 = 2;

/// Requests for more places than this are capped, as `toFixed` does.
pub const MAX_DECIMALS: i32 = 100;

/// Beyond this many places an `f64` has no digits left to round.
const EXACT_PLACES: usize = 17;

const K: f64 = 1024.0;

/// Format a byte count with the largest unit that keeps the numeral >= 1.
///
/// `decimals <= 0` rounds to a whole number and anything above
/// [`MAX_DECIMALS`] is capped there. Trailing zeros are dropped,
/// so `1024` bytes at two decimals reads `"1 KB"`, not `"1.00 KB"`.
/// Zero is always the literal `"0 Bytes"`.
pub fn format_bytes(bytes: f64, decimals: i32) -> Result<String> {
    if !bytes.is_finite() || bytes < 0.0 {
        return Err(PanelError::invalid_argument(format!(
            "byte count must be a finite non-negative number, got {bytes}"
        )));
    }
    if bytes == 0.0 {
        return Ok("0 Bytes".to_string());
    }

    let unit = unit_index(bytes);
    let scaled = bytes / K.powi(unit as i32);
    let places = decimals.clamp(0, MAX_DECIMALS) as usize;

    Ok(format!("{} {}", round_to(scaled, places), BYTE_UNITS[unit]))
}

/// `floor(log1024(bytes))`, saturated into the unit table.
///
/// Found by repeated comparison rather than `ln` division, which lands a
/// hair under the integer for exact powers like 1024^3.
fn unit_index(bytes: f64) -> usize {
    let mut unit = 0;
    let mut next = K;
    while unit < BYTE_UNITS.len() - 1 && bytes >= next {
        unit += 1;
        next *= K;
    }
    unit
}

/// Round half away from zero to `places` decimals, then strip trailing zeros.
fn round_to(value: f64, places: usize) -> String {
    let rounded = if places < EXACT_PLACES {
        let factor = 10f64.powi(places as i32);
        (value * factor).round() / factor
    } else {
        value
    };
    let text = format!("{rounded:.places$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
