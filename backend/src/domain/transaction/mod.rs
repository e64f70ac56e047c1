//! Point-of-sale transaction payloads and their validators.
//!
//! Amounts on payloads are integer cents. Validators short-circuit on the
//! first broken rule and report it as a [`TransactionValidationError`] whose
//! `Display` output is the message shown to the operator.

use std::fmt;

use serde::{Deserialize, Serialize};

mod payment_status;
mod validation;

pub use payment_status::{PaymentStatus, payment_status_label, payment_status_tag};
pub use validation::{validate_create_payload, validate_refund_payload, validate_update_payload};

/// One line of a transaction being created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemPayload {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub reference_id: Option<String>,
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<i64>,
    pub line_total: Option<i64>,
}

/// Transaction creation input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionPayload {
    pub customer_id: Option<String>,
    pub appointment_id: Option<String>,
    #[serde(default)]
    pub line_items: Vec<LineItemPayload>,
    pub discount: Option<i64>,
    pub tip: Option<i64>,
    pub tax_rate: Option<f64>,
    pub tax_amount: Option<i64>,
    pub amount_tendered: Option<i64>,
    pub change_given: Option<i64>,
    pub payment_method: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Partial update applied to an existing transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionUpdatePatch {
    pub total: Option<i64>,
    pub amount_tendered: Option<i64>,
    pub change_given: Option<i64>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
}

/// Top-level money field named in a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Discount,
    Tip,
    TaxAmount,
    AmountTendered,
    ChangeGiven,
    Total,
}

impl fmt::Display for AmountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Discount => "Discount",
            Self::Tip => "Tip",
            Self::TaxAmount => "Tax amount",
            Self::AmountTendered => "Amount tendered",
            Self::ChangeGiven => "Change given",
            Self::Total => "Total",
        })
    }
}

/// First rule a transaction payload broke. Line positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Transaction must include at least one line item")]
    NoLineItems,
    #[error("Line item {position} needs a name")]
    MissingItemName { position: usize },
    #[error("Line item {position} must be a service or a product")]
    InvalidItemType { position: usize },
    #[error("Line item {position} quantity must be at least 1")]
    InvalidQuantity { position: usize },
    #[error("Line item {position} unit price cannot be negative")]
    NegativeUnitPrice { position: usize },
    #[error("Line item {position} total cannot be negative")]
    NegativeLineTotal { position: usize },
    #[error("Line item {position} is a product and needs a valid product reference")]
    InvalidProductReference { position: usize },
    #[error("Line item {position} needs a reference")]
    MissingServiceReference { position: usize },
    #[error("{field} cannot be negative")]
    NegativeAmount { field: AmountField },
    #[error("Customer id must be a valid UUID")]
    InvalidCustomerId,
    #[error("Appointment id must be a valid UUID")]
    InvalidAppointmentId,
    #[error("Payment method must be one of: cash, card, check, gift_card, other")]
    InvalidPaymentMethod,
    #[error("Status must be a valid transaction status")]
    InvalidStatus,
    #[error("Refund amount must be greater than zero")]
    RefundNotPositive,
    #[error("Refund amount cannot exceed the transaction total")]
    RefundExceedsTotal,
    #[error("Restock item {id} is not a product on this transaction")]
    InvalidRestockItem { id: String },
}
