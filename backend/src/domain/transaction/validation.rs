//! Create, refund and update rule chains.

use std::collections::HashSet;

use uuid::Uuid;

use super::{
    AmountField, CreateTransactionPayload, LineItemPayload, TransactionUpdatePatch,
    TransactionValidationError,
};
use crate::domain::enums::{LineItemKind, PaymentMethod, TransactionStatus};
use crate::domain::money::Cents;
use crate::domain::validation::{is_uuid, non_blank};

/// Validate a transaction about to be created.
///
/// Line items are checked in order before any top-level field.
///
/// # Examples
/// ```
/// use pawdesk::domain::transaction::{CreateTransactionPayload, validate_create_payload};
///
/// let error = validate_create_payload(&CreateTransactionPayload::default())
///     .expect_err("empty cart");
/// assert!(error.to_string().contains("at least one line item"));
/// ```
pub fn validate_create_payload(
    payload: &CreateTransactionPayload,
) -> Result<(), TransactionValidationError> {
    if payload.line_items.is_empty() {
        return Err(TransactionValidationError::NoLineItems);
    }
    for (index, item) in payload.line_items.iter().enumerate() {
        validate_line_item(index + 1, item)?;
    }
    let amounts = [
        (AmountField::Discount, payload.discount),
        (AmountField::Tip, payload.tip),
        (AmountField::TaxAmount, payload.tax_amount),
        (AmountField::AmountTendered, payload.amount_tendered),
        (AmountField::ChangeGiven, payload.change_given),
    ];
    ensure_non_negative(&amounts)?;
    if !optional_uuid(payload.customer_id.as_deref()) {
        return Err(TransactionValidationError::InvalidCustomerId);
    }
    if !optional_uuid(payload.appointment_id.as_deref()) {
        return Err(TransactionValidationError::InvalidAppointmentId);
    }
    ensure_payment_method(payload.payment_method.as_deref())?;
    ensure_status(payload.status.as_deref())
}

fn validate_line_item(
    position: usize,
    item: &LineItemPayload,
) -> Result<(), TransactionValidationError> {
    if non_blank(item.name.as_deref()).is_none() {
        return Err(TransactionValidationError::MissingItemName { position });
    }
    let kind = non_blank(item.item_type.as_deref())
        .and_then(|raw| raw.parse::<LineItemKind>().ok())
        .ok_or(TransactionValidationError::InvalidItemType { position })?;
    if !item.quantity.is_some_and(|quantity| quantity >= 1) {
        return Err(TransactionValidationError::InvalidQuantity { position });
    }
    if item.unit_price.is_some_and(|price| price < 0) {
        return Err(TransactionValidationError::NegativeUnitPrice { position });
    }
    if item.line_total.is_some_and(|total| total < 0) {
        return Err(TransactionValidationError::NegativeLineTotal { position });
    }
    let reference = non_blank(item.reference_id.as_deref());
    match kind {
        LineItemKind::Product if !reference.is_some_and(is_uuid) => {
            Err(TransactionValidationError::InvalidProductReference { position })
        }
        LineItemKind::Service if reference.is_none() => {
            Err(TransactionValidationError::MissingServiceReference { position })
        }
        LineItemKind::Product | LineItemKind::Service => Ok(()),
    }
}

/// Validate a refund against the original transaction.
///
/// Every id in `restock_product_ids` must be a UUID that also appears in
/// `product_reference_ids`, the references of the transaction's product
/// lines.
pub fn validate_refund_payload(
    amount: Cents,
    transaction_total: Cents,
    restock_product_ids: &[&str],
    product_reference_ids: &[&str],
) -> Result<(), TransactionValidationError> {
    if amount <= Cents::ZERO {
        return Err(TransactionValidationError::RefundNotPositive);
    }
    if amount > transaction_total {
        return Err(TransactionValidationError::RefundExceedsTotal);
    }
    let known: HashSet<Uuid> = product_reference_ids
        .iter()
        .filter_map(|raw| Uuid::try_parse(raw.trim()).ok())
        .collect();
    for raw in restock_product_ids {
        let id = raw.trim();
        let listed = is_uuid(id)
            && Uuid::try_parse(id).is_ok_and(|parsed| known.contains(&parsed));
        if !listed {
            return Err(TransactionValidationError::InvalidRestockItem { id: id.to_owned() });
        }
    }
    Ok(())
}

/// Validate a partial update to an existing transaction.
pub fn validate_update_payload(
    patch: &TransactionUpdatePatch,
) -> Result<(), TransactionValidationError> {
    let amounts = [
        (AmountField::Total, patch.total),
        (AmountField::AmountTendered, patch.amount_tendered),
        (AmountField::ChangeGiven, patch.change_given),
    ];
    ensure_non_negative(&amounts)?;
    ensure_status(patch.status.as_deref())?;
    ensure_payment_method(patch.payment_method.as_deref())
}

fn ensure_non_negative(
    amounts: &[(AmountField, Option<i64>)],
) -> Result<(), TransactionValidationError> {
    amounts
        .iter()
        .find(|(_, value)| value.is_some_and(|amount| amount < 0))
        .map_or(Ok(()), |(field, _)| {
            Err(TransactionValidationError::NegativeAmount { field: *field })
        })
}

fn optional_uuid(value: Option<&str>) -> bool {
    non_blank(value).is_none_or(is_uuid)
}

fn ensure_payment_method(value: Option<&str>) -> Result<(), TransactionValidationError> {
    match non_blank(value) {
        Some(raw) if raw.parse::<PaymentMethod>().is_err() => {
            Err(TransactionValidationError::InvalidPaymentMethod)
        }
        _ => Ok(()),
    }
}

fn ensure_status(value: Option<&str>) -> Result<(), TransactionValidationError> {
    match non_blank(value) {
        Some(raw) if raw.parse::<TransactionStatus>().is_err() => {
            Err(TransactionValidationError::InvalidStatus)
        }
        _ => Ok(()),
    }
}
