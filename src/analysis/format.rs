//! Number formatting for savings, diagnostics and report display
//!
//! Rounding is half-up (toward positive infinity on ties) and rounded values
//! print in their shortest form, so `0.40` renders as `"0.4"` and `3.0` as `"3"`.

const BYTE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Rounds to the nearest integer, ties toward positive infinity
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Rounds to `decimals` places with [`round_half_up`]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    round_half_up(value * scale) / scale
}

/// Shortest decimal rendering, with negative zero printed as `0`
pub fn format_number(value: f64) -> String {
    // -0.0 + 0.0 == +0.0
    format!("{}", value + 0.0)
}

/// Byte count as whole kilobytes, e.g. `"234KB"`
pub fn format_kilobytes(bytes: f64) -> String {
    format!("{}KB", format_number(round_half_up(bytes / 1024.0)))
}

/// Millisecond duration as seconds at the given precision, e.g. `"0.4s"`
///
/// `decimals` is at most 3; the division happens in milliseconds so integral
/// inputs round without binary-fraction error.
pub fn format_seconds(ms: f64, decimals: u32) -> String {
    let decimals = decimals.min(3);
    let step = 10f64.powi(3 - decimals as i32);
    let scale = 10f64.powi(decimals as i32);
    format!("{}s", format_number(round_half_up(ms / step) / scale))
}

/// Human-readable byte size, e.g. `"1.5 KB"`
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut threshold: u64 = 1024;
    while exponent < BYTE_UNITS.len() - 1 && bytes >= threshold {
        exponent += 1;
        threshold = threshold.saturating_mul(1024);
    }
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let trimmed: f64 = format!("{:.2}", scaled).parse().unwrap_or(scaled);

    format!("{} {}", format_number(trimmed), BYTE_UNITS[exponent])
}

/// Duration for display: whole milliseconds below one second, else seconds to 2dp
pub fn format_time(ms: f64) -> String {
    if ms < 1000.0 {
        format!("{}ms", format_number(round_half_up(ms)))
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}
