//! Printable receipt and invoice documents.
//!
//! Builders return a complete HTML document for the browser's print dialog.
//! Every value that originated with a user passes through [`escape_html`];
//! amounts are formatted from cents and never recomputed beyond the balance
//! still owed.

use serde::{Deserialize, Serialize};

use super::enums::PaymentMethod;
use super::money::{Cents, format_currency};
use super::records::{ClientRecord, LineItemRecord, TransactionRecord};

mod invoice;
mod receipt;

pub use invoice::render_invoice;
pub use receipt::render_receipt;

/// Escape `&`, `<`, `>` and `"` for HTML text and attribute values.
///
/// # Examples
/// ```
/// use pawdesk::domain::print::escape_html;
///
/// assert_eq!(escape_html(r#"<b>"Rex" & co</b>"#), "&lt;b&gt;&quot;Rex&quot; &amp; co&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// The customer an invoice is addressed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceParty {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address_lines: Vec<String>,
}

impl From<&ClientRecord> for InvoiceParty {
    fn from(client: &ClientRecord) -> Self {
        let locality = [client.city.as_deref(), client.state.as_deref(), client.zip.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let address_lines = client
            .address
            .iter()
            .map(|line| line.trim().to_owned())
            .chain(Some(locality))
            .filter(|line| !line.is_empty())
            .collect();
        Self {
            name: format!("{} {}", client.first_name, client.last_name),
            email: client.email.clone(),
            phone: Some(client.phone.clone()),
            address_lines,
        }
    }
}

const STYLE: &str = "body{font-family:-apple-system,Helvetica,Arial,sans-serif;color:#111;margin:0}\
.doc{max-width:720px;margin:0 auto;padding:24px}\
h1{font-size:20px;margin:0 0 4px}\
p{margin:2px 0}\
table{width:100%;border-collapse:collapse;margin-top:16px}\
th,td{padding:6px 4px;text-align:left}\
.num{text-align:right}\
.items th{border-bottom:1px solid #999}\
.totals td{border-top:1px solid #eee}\
.grand td{font-weight:bold;border-top:2px solid #111}\
.muted{color:#666;font-size:12px}\
@media print{.doc{padding:0}}";

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head><body><div class=\"doc\">{body}</div></body></html>",
        escape_html(title)
    )
}

fn payment_method_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "Cash",
        PaymentMethod::Card => "Card",
        PaymentMethod::Check => "Check",
        PaymentMethod::GiftCard => "Gift card",
        PaymentMethod::Other => "Other",
    }
}

/// Render a tax rate fraction (`0.0825`) as `8.25%`.
fn format_percent(rate: f64) -> String {
    let percent = format!("{:.3}", rate * 100.0);
    let trimmed = percent.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}

fn line_items_table(items: &[LineItemRecord]) -> String {
    let rows: String = items
        .iter()
        .map(|item| {
            format!(
                "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
                escape_html(&item.name),
                item.quantity,
                format_currency(item.unit_price),
                format_currency(item.line_total),
            )
        })
        .collect();
    format!(
        "<table class=\"items\"><thead><tr><th>Item</th><th class=\"num\">Qty</th><th class=\"num\">Price</th><th class=\"num\">Total</th></tr></thead><tbody>{rows}</tbody></table>"
    )
}

fn total_row(label: &str, amount: &str) -> String {
    format!(
        "<tr><td>{}</td><td class=\"num\">{amount}</td></tr>",
        escape_html(label)
    )
}

/// Subtotal through grand total. Zero discount and tip rows are omitted.
fn totals_rows(transaction: &TransactionRecord) -> String {
    let mut rows = total_row("Subtotal", &format_currency(transaction.subtotal));
    if transaction.discount > Cents::ZERO {
        rows.push_str(&total_row(
            "Discount",
            &format!("-{}", format_currency(transaction.discount)),
        ));
    }
    let tax_label = if transaction.tax_rate > 0.0 {
        format!("Tax ({})", format_percent(transaction.tax_rate))
    } else {
        "Tax".to_owned()
    };
    rows.push_str(&total_row(&tax_label, &format_currency(transaction.tax_amount)));
    if transaction.tip > Cents::ZERO {
        rows.push_str(&total_row("Tip", &format_currency(transaction.tip)));
    }
    rows.push_str(&format!(
        "<tr class=\"grand\"><td>Total</td><td class=\"num\">{}</td></tr>",
        format_currency(transaction.total)
    ));
    rows
}

fn issued_on(transaction: &TransactionRecord) -> String {
    transaction
        .created_at
        .format("%b %-d, %Y %-I:%M %p")
        .to_string()
}
