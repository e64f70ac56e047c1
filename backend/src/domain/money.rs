//! Integer-cent money and dollar conversions.
//!
//! Amounts are stored and summed as whole cents. Floating-point dollars only
//! appear at the edges: form input on the way in, display on the way out.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A signed amount of money in whole cents.
///
/// # Examples
/// ```
/// use pawdesk::domain::money::{Cents, format_currency};
///
/// assert_eq!(format_currency(Cents::new(123_456)), "$1,234.56");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw cent count.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw cent count.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// True when the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Cents {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_currency(*self))
    }
}

/// Convert dollars to cents, rounding half away from zero.
///
/// Non-finite input converts to zero; out-of-range input saturates.
#[must_use]
pub fn to_cents(dollars: f64) -> Cents {
    if !dollars.is_finite() {
        return Cents::ZERO;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float-to-int casts saturate and the value is already rounded"
    )]
    let cents = (dollars * 100.0).round() as i64;
    Cents(cents)
}

/// Convert cents to dollars.
#[must_use]
pub fn from_cents(cents: Cents) -> f64 {
    #[expect(
        clippy::cast_precision_loss,
        reason = "amounts stay far below 2^53 cents"
    )]
    let raw = cents.0 as f64;
    raw / 100.0
}

/// Render cents as `$1,234.56`, with a leading `-` for negative amounts.
#[must_use]
pub fn format_currency(cents: Cents) -> String {
    let sign = if cents.is_negative() { "-" } else { "" };
    let magnitude = cents.0.unsigned_abs();
    let dollars = group_thousands(magnitude / 100);
    format!("{sign}${dollars}.{:02}", magnitude % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "$0.00")]
    #[case(5, "$0.05")]
    #[case(1999, "$19.99")]
    #[case(100_000, "$1,000.00")]
    #[case(123_456_789, "$1,234,567.89")]
    #[case(-250, "-$2.50")]
    fn formats_currency(#[case] cents: i64, #[case] expected: &str) {
        assert_eq!(format_currency(Cents::new(cents)), expected);
    }

    #[rstest]
    #[case(12.34, 1234)]
    #[case(0.1 + 0.2, 30)]
    #[case(19.999, 2000)]
    #[case(-4.005, -401)]
    #[case(f64::NAN, 0)]
    fn converts_dollars_to_cents(#[case] dollars: f64, #[case] expected: i64) {
        assert_eq!(to_cents(dollars), Cents::new(expected));
    }

    #[rstest]
    fn cents_round_trip_through_dollars() {
        let samples = (0..10_000).chain([99_999, 1_000_001, 987_654_321, 9_007_199_254]);
        for raw in samples {
            let cents = Cents::new(raw);
            assert_eq!(to_cents(from_cents(cents)), cents, "{raw}");
        }
    }

    #[rstest]
    fn sums_and_differences_saturate() {
        let total: Cents = [Cents::new(150), Cents::new(250)].into_iter().sum();
        assert_eq!(total, Cents::new(400));
        assert_eq!(Cents::new(i64::MAX) + Cents::new(1), Cents::new(i64::MAX));
        assert_eq!(Cents::new(100) - Cents::new(250), Cents::new(-150));
    }
}
