//! Point-of-sale receipt.

use super::{
    document, escape_html, issued_on, line_items_table, payment_method_label, total_row,
    totals_rows,
};
use crate::domain::formatting::format_phone;
use crate::domain::money::format_currency;
use crate::domain::records::{BusinessProfile, TransactionRecord};

const DEFAULT_FOOTER: &str = "Thank you for your business!";

/// Render a receipt for a completed sale.
#[must_use]
pub fn render_receipt(transaction: &TransactionRecord, business: &BusinessProfile) -> String {
    let number = transaction.display_number();
    let mut body = String::new();

    body.push_str(&format!("<header><h1>{}</h1>", escape_html(&business.name)));
    for line in business.address_lines() {
        body.push_str(&format!("<p>{}</p>", escape_html(&line)));
    }
    if let Some(phone) = business.phone.as_deref() {
        body.push_str(&format!("<p>{}</p>", escape_html(&format_phone(phone))));
    }
    body.push_str("</header>");

    body.push_str(&format!(
        "<p class=\"muted\">Receipt #{} &middot; {}</p>",
        escape_html(&number),
        issued_on(transaction)
    ));
    if let Some(customer) = transaction.customer.as_ref() {
        body.push_str(&format!(
            "<p>Customer: {}</p>",
            escape_html(&customer.full_name())
        ));
    }

    body.push_str(&line_items_table(&transaction.line_items));

    body.push_str("<table class=\"totals\">");
    body.push_str(&totals_rows(transaction));
    if let Some(method) = transaction.payment_method {
        body.push_str(&total_row("Paid by", payment_method_label(method)));
    }
    if let Some(tendered) = transaction.amount_tendered {
        body.push_str(&total_row("Tendered", &format_currency(tendered)));
    }
    if let Some(change) = transaction.change_given {
        body.push_str(&total_row("Change", &format_currency(change)));
    }
    body.push_str("</table>");

    let footer = business
        .receipt_footer
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(DEFAULT_FOOTER);
    body.push_str(&format!(
        "<footer><p class=\"muted\">{}</p></footer>",
        escape_html(footer)
    ));

    document(&format!("Receipt {number}"), &body)
}
