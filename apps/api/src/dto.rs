//! # Request / Response DTOs
//!
//! Wire shapes of the HTTP API. Field names are camelCase; money is integer
//! cents with a `Cents` suffix.
//!
//! ```text
//! POST /invoices                         200 OK
//! {                                      {
//!   "billNumber": 1,                       "invoiceId": "…",
//!   "date": "2024-03-01",                  "billTotalCents": 3500,
//!   "clientId": "…",                       "netTotalCents": 3150,
//!   "percentageDiscount": 10,              "theRestCents": 850
//!   "paidUpCents": 4000,                 }
//!   "invoiceItems": [
//!     {"itemId": "…", "sellingPriceCents": 1000, "quantity": 2}
//!   ]
//! }
//! ```

use bill_core::validation::ValidationResult;
use bill_core::{
    Client, Company, Invoice, InvoiceItem, InvoiceTotals, Item, ProductTypeWithCompany,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Invoices
// =============================================================================

/// Body of `POST /invoices` and `PUT /invoices/{id}`.
///
/// A `billTotal` sent by the caller is accepted and ignored; totals are
/// always recomputed from the lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub bill_number: i64,
    /// `None` when absent or null; rejected by validation.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub client_id: String,
    /// Whole-number percentage, 10 = 10%.
    #[serde(default)]
    pub percentage_discount: f64,
    #[serde(default)]
    pub paid_up_cents: i64,
    #[serde(default)]
    pub invoice_items: Vec<InvoiceItemRequest>,
}

/// One submitted invoice line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemRequest {
    pub item_id: String,
    pub selling_price_cents: i64,
    pub quantity: i64,
}

/// Result of a create or update: the id and recomputed aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotalsResponse {
    pub invoice_id: String,
    pub bill_total_cents: i64,
    pub net_total_cents: i64,
    pub the_rest_cents: i64,
}

impl InvoiceTotalsResponse {
    pub fn new(invoice_id: &str, totals: &InvoiceTotals) -> Self {
        InvoiceTotalsResponse {
            invoice_id: invoice_id.to_string(),
            bill_total_cents: totals.bill_total.cents(),
            net_total_cents: totals.net_total.cents(),
            the_rest_cents: totals.the_rest.cents(),
        }
    }
}

/// Embedded client reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: String,
    pub name: String,
}

/// One line in an invoice projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineResponse {
    pub item_id: String,
    pub name: String,
    pub selling_price_cents: i64,
    pub quantity: i64,
    pub total_value_cents: i64,
}

impl From<&InvoiceItem> for InvoiceLineResponse {
    fn from(line: &InvoiceItem) -> Self {
        InvoiceLineResponse {
            item_id: line.item_id.clone(),
            name: line.name.clone(),
            selling_price_cents: line.selling_price_cents,
            quantity: line.quantity,
            total_value_cents: line.total_value_cents,
        }
    }
}

/// Full projection of an invoice with its lines and derived aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub invoice_id: String,
    pub bill_number: i64,
    pub date: NaiveDate,
    pub client: ClientRef,
    pub percentage_discount: f64,
    pub paid_up_cents: i64,
    pub invoice_items: Vec<InvoiceLineResponse>,
    pub bill_total_cents: i64,
    pub net_total_cents: i64,
    pub the_rest_cents: i64,
}

impl InvoiceResponse {
    /// Projects an invoice; the aggregates are computed from `lines`.
    pub fn project(
        invoice: &Invoice,
        client: ClientRef,
        lines: &[InvoiceItem],
    ) -> ValidationResult<Self> {
        let totals = invoice.totals(lines)?;

        Ok(InvoiceResponse {
            invoice_id: invoice.id.clone(),
            bill_number: invoice.bill_number,
            date: invoice.date,
            client,
            percentage_discount: invoice.discount().percentage(),
            paid_up_cents: invoice.paid_up_cents,
            invoice_items: lines.iter().map(InvoiceLineResponse::from).collect(),
            bill_total_cents: totals.bill_total.cents(),
            net_total_cents: totals.net_total.cents(),
            the_rest_cents: totals.the_rest.cents(),
        })
    }
}

// =============================================================================
// Types
// =============================================================================

/// Body of `POST /types` and `PUT /types/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRequest {
    pub type_name: String,
    #[serde(default)]
    pub type_notes: Option<String>,
    pub company_name: String,
}

/// A type projected with the name of its company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeResponse {
    pub type_id: String,
    pub type_name: String,
    pub type_notes: Option<String>,
    pub company_name: String,
}

impl From<ProductTypeWithCompany> for TypeResponse {
    fn from(ty: ProductTypeWithCompany) -> Self {
        TypeResponse {
            type_id: ty.id,
            type_name: ty.name,
            type_notes: ty.notes,
            company_name: ty.company_name,
        }
    }
}

/// Query of `GET /types/GetTypesByCompanyName`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyNameQuery {
    #[serde(default)]
    pub company_name: Option<String>,
}

// =============================================================================
// Companies, Clients, Items
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRequest {
    pub company_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub company_id: String,
    pub company_name: String,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        CompanyResponse {
            company_id: company.id,
            company_name: company.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRequest {
    pub client_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub client_id: String,
    pub client_name: String,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        ClientResponse {
            client_id: client.id,
            client_name: client.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub item_name: String,
    pub unit_price_cents: i64,
    #[serde(default)]
    pub type_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub item_id: String,
    pub item_name: String,
    pub unit_price_cents: i64,
    pub type_id: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        ItemResponse {
            item_id: item.id,
            item_name: item.name,
            unit_price_cents: item.unit_price_cents,
            type_id: item.type_id,
        }
    }
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
}
