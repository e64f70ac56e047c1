//! Display helpers shared by list views and print builders.
//!
//! Each helper is total: input it cannot interpret comes back unchanged
//! (trimmed) rather than as an error, so a malformed stored value never
//! blanks a printed receipt.

use chrono::NaiveDate;

use super::validation::parse_time_of_day;

/// Format a North American phone number.
///
/// # Examples
/// ```
/// use pawdesk::domain::formatting::format_phone;
///
/// assert_eq!(format_phone("555.123.4567"), "(555) 123-4567");
/// assert_eq!(format_phone("1-555-123-4567"), "+1 (555) 123-4567");
/// assert_eq!(format_phone(" ext 12 "), "ext 12");
/// ```
#[must_use]
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => group_phone_digits(&digits),
        11 if digits.starts_with('1') => {
            format!("+1 {}", group_phone_digits(digits.get(1..).unwrap_or_default()))
        }
        _ => raw.trim().to_owned(),
    }
}

fn group_phone_digits(ten: &str) -> String {
    let area = ten.get(0..3).unwrap_or_default();
    let exchange = ten.get(3..6).unwrap_or_default();
    let line = ten.get(6..).unwrap_or_default();
    format!("({area}) {exchange}-{line}")
}

/// Format an ISO `YYYY-MM-DD` date as `Jan 5, 2026`.
#[must_use]
pub fn format_date(iso: &str) -> String {
    let trimmed = iso.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_or_else(|_| trimmed.to_owned(), |date| date.format("%b %-d, %Y").to_string())
}

/// Format a 24-hour `HH:MM[:SS]` time as `2:30 PM`.
#[must_use]
pub fn format_time(value: &str) -> String {
    let Some(minutes) = parse_time_of_day(value) else {
        return value.trim().to_owned();
    };
    let (hour, minute) = (minutes / 60, minutes % 60);
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{display_hour}:{minute:02} {meridiem}")
}

/// Format a duration in minutes as `45m`, `2h`, or `1h 30m`.
#[must_use]
pub fn format_duration(total_minutes: u32) -> String {
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);
    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5551234567", "(555) 123-4567")]
    #[case("(555) 123-4567", "(555) 123-4567")]
    #[case("+1 555 123 4567", "+1 (555) 123-4567")]
    #[case("25551234567", "25551234567")]
    #[case("  555-0100 ", "555-0100")]
    #[case("", "")]
    fn formats_phone_numbers(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_phone(raw), expected);
    }

    #[rstest]
    #[case("2026-01-05", "Jan 5, 2026")]
    #[case("2025-12-31", "Dec 31, 2025")]
    #[case("2026-02-30", "2026-02-30")]
    #[case("soon", "soon")]
    fn formats_dates(#[case] iso: &str, #[case] expected: &str) {
        assert_eq!(format_date(iso), expected);
    }

    #[rstest]
    #[case("14:30", "2:30 PM")]
    #[case("14:30:59", "2:30 PM")]
    #[case("00:05", "12:05 AM")]
    #[case("9:00", "9:00 AM")]
    #[case("12:00", "12:00 PM")]
    #[case("25:00", "25:00")]
    fn formats_times(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(format_time(value), expected);
    }

    #[rstest]
    #[case(0, "0m")]
    #[case(45, "45m")]
    #[case(60, "1h")]
    #[case(90, "1h 30m")]
    #[case(135, "2h 15m")]
    fn formats_durations(#[case] minutes: u32, #[case] expected: &str) {
        assert_eq!(format_duration(minutes), expected);
    }
}
