//! Fixed vocabularies used by records and validators.
//!
//! Each enum serialises as `snake_case`, parses from the same spelling, and
//! exposes `ALL` so validators can report the accepted set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! string_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident, $error:ident, $label:literal {
            $( $(#[$variant_meta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$variant_meta])* $variant, )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire spelling of the variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        #[doc = concat!("Parse error for [`", stringify!($name), "`].")]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $error {
            pub input: String,
        }

        impl fmt::Display for $error {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "invalid {}: {}", $label, self.input)
            }
        }

        impl std::error::Error for $error {}

        impl FromStr for $name {
            type Err = $error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $( $text => Ok(Self::$variant), )+
                    _ => Err($error {
                        input: value.to_owned(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// Animal kind recorded on a pet.
    pub enum Species, ParseSpeciesError, "species" {
        Dog => "dog",
        Cat => "cat",
        Other => "other",
    }
}

string_enum! {
    /// Vaccination record state for a pet.
    pub enum VaccinationStatus, ParseVaccinationStatusError, "vaccination status" {
        UpToDate => "up_to_date",
        DueSoon => "due_soon",
        Overdue => "overdue",
        Unknown => "unknown",
    }
}

string_enum! {
    /// Appointment lifecycle state.
    pub enum AppointmentStatus, ParseAppointmentStatusError, "appointment status" {
        Scheduled => "scheduled",
        Confirmed => "confirmed",
        InProgress => "in_progress",
        Completed => "completed",
        Canceled => "canceled",
        NoShow => "no_show",
    }
}

string_enum! {
    /// Point-of-sale transaction state.
    pub enum TransactionStatus, ParseTransactionStatusError, "transaction status" {
        Pending => "pending",
        InProgress => "in_progress",
        Paid => "paid",
        Partial => "partial",
        Refunded => "refunded",
        PartialRefund => "partial_refund",
        Void => "void",
    }
}

string_enum! {
    /// How a transaction was tendered.
    pub enum PaymentMethod, ParsePaymentMethodError, "payment method" {
        Cash => "cash",
        Card => "card",
        Check => "check",
        GiftCard => "gift_card",
        Other => "other",
    }
}

string_enum! {
    /// What a transaction line item sells.
    pub enum LineItemKind, ParseLineItemKindError, "line item type" {
        Service => "service",
        Product => "product",
    }
}
