//! Remaining-time display formatting

/// Format a second count as "HH:MM:SS". Each field is zero-padded to two
/// digits; the hour field grows past two digits rather than wrapping.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_hms(0), "00:00:00");
    }

    #[test]
    fn formats_seconds_only() {
        assert_eq!(format_hms(59), "00:00:59");
    }

    #[test]
    fn formats_exact_minute() {
        assert_eq!(format_hms(60), "00:01:00");
    }

    #[test]
    fn formats_hour_minute_second() {
        assert_eq!(format_hms(3661), "01:01:01");
    }

    #[test]
    fn hours_grow_past_two_digits() {
        assert_eq!(format_hms(90061), "25:01:01");
        assert_eq!(format_hms(360_000), "100:00:00");
    }
}
