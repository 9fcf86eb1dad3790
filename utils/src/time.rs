//! Time formatting helpers.

use camp_types::Timestamp;

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// How long a stream runs. A stream that ends before it starts has no duration.
pub fn format_stream_period(start: Timestamp, end: Timestamp) -> String {
    format_duration(end.as_unix_secs().saturating_sub(start.as_unix_secs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_picks_the_two_largest_units() {
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(61), "1m 1s");
        assert_eq!(format_duration(7_260), "2h 1m");
        assert_eq!(format_duration(90_000), "1d 1h");
    }

    #[test]
    fn stream_period_is_end_minus_start() {
        let start = Timestamp::from_unix_secs(1_700_000_000);
        let end = Timestamp::from_unix_secs(1_700_000_000 + 365 * 86_400);
        assert_eq!(format_stream_period(start, end), "365d 0h");
    }

    #[test]
    fn inverted_stream_period_is_zero() {
        let start = Timestamp::from_unix_secs(200);
        let end = Timestamp::from_unix_secs(100);
        assert_eq!(format_stream_period(start, end), "0s");
    }
}
