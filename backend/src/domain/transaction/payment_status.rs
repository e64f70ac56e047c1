//! Payment progress derived from the amount paid against the total.

use serde::Serialize;

use crate::domain::money::Cents;

/// How much of a transaction has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

impl PaymentStatus {
    /// Classify `amount_paid` against `total`.
    ///
    /// Nothing paid is always unpaid, even for a zero total. Overpayment
    /// still counts as paid.
    #[must_use]
    pub fn from_amounts(amount_paid: Cents, total: Cents) -> Self {
        if amount_paid <= Cents::ZERO {
            Self::Unpaid
        } else if amount_paid < total {
            Self::Partial
        } else {
            Self::Paid
        }
    }

    /// Human label for badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unpaid => "Unpaid",
            Self::Partial => "Partial",
            Self::Paid => "Paid",
        }
    }

    /// Style tag matching the transaction status vocabulary.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Unpaid => "pending",
            Self::Partial => "partial",
            Self::Paid => "paid",
        }
    }
}

/// Label for the payment progress badge.
#[must_use]
pub fn payment_status_label(amount_paid: Cents, total: Cents) -> &'static str {
    PaymentStatus::from_amounts(amount_paid, total).label()
}

/// Style tag for the payment progress badge.
#[must_use]
pub fn payment_status_tag(amount_paid: Cents, total: Cents) -> &'static str {
    PaymentStatus::from_amounts(amount_paid, total).tag()
}
