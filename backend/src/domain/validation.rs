//! Primitive field checks shared by the entity validators.
//!
//! Every check is a pure predicate over borrowed input. Entity modules combine
//! them into short-circuiting rule chains and own the resulting messages.

use uuid::Uuid;

const CANONICAL_UUID_LEN: usize = 36;

/// Return the trimmed value when it is present and not blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

/// Canonical hyphenated UUID (`8-4-4-4-12` hex digits), case-insensitive.
///
/// # Examples
/// ```
/// use pawdesk::domain::validation::is_uuid;
///
/// assert!(is_uuid("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
/// assert!(!is_uuid("3fa85f6457174562b3fc2c963f66afa6"));
/// ```
pub fn is_uuid(value: &str) -> bool {
    value.len() == CANONICAL_UUID_LEN && Uuid::try_parse(value).is_ok()
}

/// Loose `local@domain.tld` shape with no whitespace and a single `@`.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

/// `H:MM`, `HH:MM`, or either with `:SS`; hour 0–23, minute and second 0–59.
pub fn is_time(value: &str) -> bool {
    parse_time_of_day(value).is_some()
}

/// `YYYY-MM-DD` shape. Calendar validity is left to storage.
pub fn is_date(value: &str) -> bool {
    let mut parts = value.split('-');
    let shape = [4_usize, 2, 2];
    let matches_shape = shape.iter().all(|expected| {
        parts
            .next()
            .is_some_and(|part| part.len() == *expected && all_ascii_digits(part))
    });
    matches_shape && parts.next().is_none()
}

/// Parse a time of day into minutes since midnight, ignoring seconds.
///
/// Returns `None` for anything [`is_time`] rejects.
pub fn parse_time_of_day(value: &str) -> Option<u32> {
    let mut parts = value.trim().split(':');
    let hour = parse_component(parts.next()?, 1..=2, 23)?;
    let minute = parse_component(parts.next()?, 2..=2, 59)?;
    if let Some(second) = parts.next() {
        parse_component(second, 2..=2, 59)?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(hour * 60 + minute)
}

fn parse_component(raw: &str, width: std::ops::RangeInclusive<usize>, max: u32) -> Option<u32> {
    if !width.contains(&raw.len()) || !all_ascii_digits(raw) {
        return None;
    }
    raw.parse::<u32>().ok().filter(|value| *value <= max)
}

fn all_ascii_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit())
}
