//! Customer invoice.

use super::{
    InvoiceParty, document, escape_html, issued_on, line_items_table, payment_method_label,
    total_row, totals_rows,
};
use crate::domain::formatting::format_phone;
use crate::domain::money::{Cents, format_currency};
use crate::domain::records::{BusinessProfile, TransactionRecord};

fn party_block(heading: &str, lines: impl IntoIterator<Item = String>) -> String {
    let mut block = format!("<div class=\"party\"><p class=\"muted\">{heading}</p>");
    for line in lines {
        block.push_str(&format!("<p>{}</p>", escape_html(&line)));
    }
    block.push_str("</div>");
    block
}

/// Render an invoice addressed to `bill_to`.
///
/// Shows the amount already paid and the balance still owed, floored at
/// zero for overpaid transactions.
#[must_use]
pub fn render_invoice(
    transaction: &TransactionRecord,
    bill_to: &InvoiceParty,
    business: &BusinessProfile,
) -> String {
    let number = transaction.display_number();
    let mut body = format!(
        "<header><h1>Invoice #{}</h1><p class=\"muted\">Issued {}</p><p class=\"muted\">Status: {}</p></header>",
        escape_html(&number),
        issued_on(transaction),
        transaction.payment_status().label()
    );

    let from = std::iter::once(business.name.clone())
        .chain(business.address_lines())
        .chain(business.phone.as_deref().map(format_phone))
        .chain(business.email.clone());
    body.push_str(&party_block("From", from));

    let to = std::iter::once(bill_to.name.clone())
        .chain(bill_to.address_lines.iter().cloned())
        .chain(bill_to.phone.as_deref().map(format_phone))
        .chain(bill_to.email.clone());
    body.push_str(&party_block("Bill to", to));

    body.push_str(&line_items_table(&transaction.line_items));

    let balance = (transaction.total - transaction.amount_paid).max(Cents::ZERO);
    body.push_str("<table class=\"totals\">");
    body.push_str(&totals_rows(transaction));
    body.push_str(&total_row(
        "Amount paid",
        &format_currency(transaction.amount_paid),
    ));
    if let Some(method) = transaction.payment_method {
        body.push_str(&total_row("Payment method", payment_method_label(method)));
    }
    body.push_str(&format!(
        "<tr class=\"grand\"><td>Balance due</td><td class=\"num\">{}</td></tr>",
        format_currency(balance)
    ));
    body.push_str("</table>");

    if let Some(notes) = transaction.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        body.push_str(&format!("<p class=\"muted\">{}</p>", escape_html(notes.trim())));
    }

    document(&format!("Invoice {number}"), &body)
}
