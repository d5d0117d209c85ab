//! Wall-clock helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as Unix milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format Unix milliseconds as ISO-8601 UTC with millisecond precision
/// and a `Z` suffix, e.g. `2024-01-28T00:00:00.000Z`.
pub fn iso_millis(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_millis_uses_z_suffix() {
        assert_eq!(iso_millis(1706400000000), "2024-01-28T00:00:00.000Z");
        assert_eq!(iso_millis(1706400000123), "2024-01-28T00:00:00.123Z");
    }

    #[test]
    fn test_iso_millis_epoch() {
        assert_eq!(iso_millis(0), "1970-01-01T00:00:00.000Z");
    }
}
