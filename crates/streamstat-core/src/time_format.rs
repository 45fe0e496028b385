//! Human-readable listening durations

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Format milliseconds as `Hh Mm Ss MSms`
///
/// Hours are not wrapped into days.
///
/// # Examples
/// ```
/// use streamstat_core::time_format::format_duration_ms;
///
/// assert_eq!(format_duration_ms(3_723_004), "1h 2m 3s 4ms");
/// assert_eq!(format_duration_ms(0), "0h 0m 0s 0ms");
/// ```
pub fn format_duration_ms(ms: u64) -> String {
    let hours = ms / MS_PER_HOUR;
    let remaining = ms % MS_PER_HOUR;
    let minutes = remaining / MS_PER_MINUTE;
    let remaining = remaining % MS_PER_MINUTE;
    let seconds = remaining / MS_PER_SECOND;
    let millis = remaining % MS_PER_SECOND;

    format!("{hours}h {minutes}m {seconds}s {millis}ms")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_components() {
        assert_eq!(format_duration_ms(999), "0h 0m 0s 999ms");
        assert_eq!(format_duration_ms(1_000), "0h 0m 1s 0ms");
        assert_eq!(format_duration_ms(61_001), "0h 1m 1s 1ms");
        assert_eq!(format_duration_ms(3_600_000), "1h 0m 0s 0ms");
    }

    #[test]
    fn test_format_duration_does_not_wrap_days() {
        assert_eq!(format_duration_ms(100 * 3_600_000 + 59_999), "100h 0m 59s 999ms");
    }
}
