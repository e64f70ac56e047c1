//! Typed rows returned by the hosted backend.
//!
//! Joined relations arrive as nested objects when the query selects them and
//! are absent otherwise; they are modelled as `Option<...Summary>`. Rows are
//! deserialised once at the boundary so views never probe untyped JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{
    AppointmentStatus, LineItemKind, PaymentMethod, Species, TransactionStatus, VaccinationStatus,
};
use super::money::Cents;
use super::transaction::PaymentStatus;

/// Client fields embedded by joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl ClientSummary {
    /// `First Last`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Pet fields embedded by joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetSummary {
    pub id: Uuid,
    pub name: String,
    pub species: Species,
}

/// Service fields embedded by joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: u32,
}

/// A row of the `clients` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: Uuid,
    pub business_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub pets: Option<Vec<PetSummary>>,
}

/// A row of the `pets` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetRecord {
    pub id: Uuid,
    pub business_id: Uuid,
    pub client_id: Option<Uuid>,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub birth_month: Option<u8>,
    pub birth_year: Option<i32>,
    pub weight: Option<f64>,
    pub vaccination_status: Option<VaccinationStatus>,
    pub photo_url: Option<String>,
    pub client: Option<ClientSummary>,
}

impl PetRecord {
    /// Pets without an owner are listed under "Unassigned".
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        self.client_id.is_none()
    }
}

/// A row of the `services` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Cents,
    pub duration_minutes: u32,
    pub active: bool,
}

/// A row of the `appointments` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: Uuid,
    pub business_id: Uuid,
    pub client_id: Uuid,
    pub pet_id: Uuid,
    pub service_id: Uuid,
    pub appointment_date: NaiveDate,
    pub start_time: String,
    pub end_time: Option<String>,
    pub status: AppointmentStatus,
    pub total_price: Option<Cents>,
    pub notes: Option<String>,
    pub client: Option<ClientSummary>,
    pub pet: Option<PetSummary>,
    pub service: Option<ServiceSummary>,
}

/// A stored transaction line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemRecord {
    #[serde(rename = "type")]
    pub kind: LineItemKind,
    pub reference_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Cents,
    pub line_total: Cents,
}

/// A row of the `transactions` table with its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub business_id: Uuid,
    pub transaction_number: Option<String>,
    pub customer_id: Option<Uuid>,
    pub appointment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub line_items: Vec<LineItemRecord>,
    pub subtotal: Cents,
    #[serde(default)]
    pub discount: Cents,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub tax_amount: Cents,
    #[serde(default)]
    pub tip: Cents,
    pub total: Cents,
    #[serde(default)]
    pub amount_paid: Cents,
    pub amount_tendered: Option<Cents>,
    pub change_given: Option<Cents>,
    pub payment_method: Option<PaymentMethod>,
    pub status: TransactionStatus,
    pub notes: Option<String>,
    pub customer: Option<ClientSummary>,
}

impl TransactionRecord {
    /// Payment progress of this transaction.
    #[must_use]
    pub fn payment_status(&self) -> PaymentStatus {
        PaymentStatus::from_amounts(self.amount_paid, self.total)
    }

    /// References of product lines, as accepted by
    /// [`validate_refund_payload`](super::transaction::validate_refund_payload).
    #[must_use]
    pub fn product_reference_ids(&self) -> Vec<&str> {
        self.line_items
            .iter()
            .filter(|item| item.kind == LineItemKind::Product)
            .map(|item| item.reference_id.as_str())
            .collect()
    }

    /// Receipt number, falling back to the first block of the row id.
    #[must_use]
    pub fn display_number(&self) -> String {
        self.transaction_number.clone().unwrap_or_else(|| {
            let simple = self.id.simple().to_string();
            simple.get(..8).unwrap_or(&simple).to_uppercase()
        })
    }
}

/// A row of the `products` (inventory) table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Uuid,
    pub business_id: Uuid,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub name: String,
    pub quantity: i64,
    pub price: Cents,
    pub cost: Option<Cents>,
    pub reorder_level: Option<i64>,
}

impl ProductRecord {
    /// True when stock has fallen to the reorder level.
    #[must_use]
    pub fn needs_reorder(&self) -> bool {
        self.reorder_level
            .is_some_and(|level| self.quantity <= level)
    }
}

/// The `businesses` row used on printed documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub tax_rate: Option<f64>,
    pub receipt_footer: Option<String>,
}

impl BusinessProfile {
    /// Street line followed by `City, ST 12345`, omitting empty parts.
    #[must_use]
    pub fn address_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(street) = self.address.as_deref().filter(|s| !s.trim().is_empty()) {
            lines.push(street.trim().to_owned());
        }
        let region = [self.state.as_deref(), self.zip.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let city = self.city.as_deref().map(str::trim).unwrap_or_default();
        let locality = match (city.is_empty(), region.is_empty()) {
            (true, true) => None,
            (false, true) => Some(city.to_owned()),
            (true, false) => Some(region),
            (false, false) => Some(format!("{city}, {region}")),
        };
        lines.extend(locality);
        lines
    }
}
