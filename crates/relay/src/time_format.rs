//! Conversions between entered/displayed time strings and seconds.

use time::OffsetDateTime;

use crate::errors::RelayError;

/// Parses `MM:SS` or `HH:MM:SS` into total seconds.
///
/// Segments are whole numbers; a total that does not fit in `u64` is
/// rejected like any other malformed input.
pub fn parse_time_input(input: &str) -> Result<u64, RelayError> {
    let invalid = || RelayError::InvalidTimeFormat(input.to_string());

    let parts = input
        .split(':')
        .map(|p| p.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    let (h, m, s) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => (0, *m, *s),
        _ => return Err(invalid()),
    };

    h.checked_mul(3600)
        .and_then(|total| m.checked_mul(60)?.checked_add(total))
        .and_then(|total| total.checked_add(s))
        .ok_or_else(invalid)
}

/// Formats seconds back into the `M:SS` / `H:MM:SS` input form.
pub fn seconds_to_time_input(total_seconds: u64) -> String {
    hms(total_seconds)
}

/// Formats a pace in minutes per mile as `M:SS`.
pub fn format_pace(min_per_mile: f64) -> String {
    let total = (min_per_mile * 60.0).round().max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Formats a duration as `H:MM:SS`, or `M:SS` under an hour.
pub fn format_duration(total_seconds: f64) -> String {
    hms(total_seconds.round().max(0.0) as u64)
}

/// Formats a timestamp as a 12-hour clock time, e.g. `6:05 AM`.
pub fn format_clock_time(ts: OffsetDateTime) -> String {
    let period = if ts.hour() < 12 { "AM" } else { "PM" };
    let hour = match ts.hour() % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour, ts.minute(), period)
}

fn hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_parse_time_input() {
        assert_eq!(parse_time_input("5:30").unwrap(), 330);
        assert_eq!(parse_time_input("1:05:30").unwrap(), 3930);
        assert_eq!(parse_time_input("45:00").unwrap(), 2700);
        assert_eq!(parse_time_input("03:15:00").unwrap(), 11700);
    }

    #[test]
    fn test_parse_time_input_rejects_garbage() {
        assert!(matches!(
            parse_time_input("abc"),
            Err(RelayError::InvalidTimeFormat(_))
        ));
        assert!(parse_time_input("330").is_err());
        assert!(parse_time_input("1:2:3:4").is_err());
        assert!(parse_time_input("5:3x").is_err());
        assert!(parse_time_input("").is_err());
    }

    #[test]
    fn test_parse_time_input_overflow_is_an_error() {
        assert!(matches!(
            parse_time_input("18446744073709551615:00"),
            Err(RelayError::InvalidTimeFormat(_))
        ));
        assert!(parse_time_input("5124095576030432:00:00").is_err());
        assert!(parse_time_input("0:18446744073709551615").is_ok());
        assert!(parse_time_input("1:18446744073709551615").is_err());
    }

    #[test]
    fn test_parse_time_input_whole_seconds_only() {
        assert!(matches!(
            parse_time_input("7:30.5"),
            Err(RelayError::InvalidTimeFormat(_))
        ));
        assert!(parse_time_input("1.5:00").is_err());
    }

    #[test]
    fn test_seconds_to_time_input() {
        assert_eq!(seconds_to_time_input(330), "5:30");
        assert_eq!(seconds_to_time_input(3930), "1:05:30");
        assert_eq!(seconds_to_time_input(59), "0:59");
        assert_eq!(seconds_to_time_input(3600), "1:00:00");
    }

    #[test]
    fn test_format_pace() {
        assert_eq!(format_pace(7.5), "7:30");
        assert_eq!(format_pace(8.0), "8:00");
        assert_eq!(format_pace(6.05), "6:03");
        // 9.999 min rounds up to a full minute rather than "9:60"
        assert_eq!(format_pace(9.999), "10:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(2400.0), "40:00");
        assert_eq!(format_duration(3930.4), "1:05:30");
        assert_eq!(format_duration(5.0), "0:05");
    }

    #[test]
    fn test_format_clock_time() {
        assert_eq!(format_clock_time(datetime!(2025-08-22 06:05 UTC)), "6:05 AM");
        assert_eq!(format_clock_time(datetime!(2025-08-22 00:30 UTC)), "12:30 AM");
        assert_eq!(format_clock_time(datetime!(2025-08-22 12:00 UTC)), "12:00 PM");
        assert_eq!(format_clock_time(datetime!(2025-08-22 23:45 UTC)), "11:45 PM");
    }
}
