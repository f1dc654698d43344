//! # Domain Types
//!
//! Core domain entities of the invoicing back-office.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Invoice      │   │  InvoiceItem    │   │      Item       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  invoice_id(FK) │   │  id (UUID)      │       │
//! │  │  bill_number    │   │  item_id (FK) ──┼──►│  name           │       │
//! │  │  date           │   │  name (frozen)  │   │  unit_price     │       │
//! │  │  discount_bps   │   │  selling_price  │   │  type_id (FK?) ─┼──┐    │
//! │  │  paid_up_cents  │   │  quantity       │   └─────────────────┘  │    │
//! │  │  client_id (FK)─┼─┐ │  total_value    │                        │    │
//! │  └─────────────────┘ │ └─────────────────┘                        │    │
//! │                      ▼                                            ▼    │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │    Company      │◄──│   ProductType   │       │
//! │  │  id, name       │   │  id, name       │   │  id, name,notes │       │
//! │  └─────────────────┘   └─────────────────┘   │  company_id(FK?)│       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! An invoice owns its line items: they are written, replaced and deleted
//! together with it. Clients, catalog items and companies are referenced,
//! never owned.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{DiscountRate, Money};
use crate::totals::{compute_totals, InvoiceTotals};
use crate::validation::ValidationResult;

/// Generates a new entity ID (UUID v4).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Company
// =============================================================================

/// A company that owns catalog classification types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Company {
    pub id: String,
    /// Unique display name; types are attached by exact name match.
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Creates a new company with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Company {
            id: new_id(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// A customer billed by invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Client {
    pub id: String,
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new client with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Client {
            id: new_id(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Product Type
// =============================================================================

/// A catalog classification record ("type") scoped to one company.
///
/// `company_id` is `None` once the owning company has been deleted; such
/// records are kept but hidden from every type listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductType {
    pub id: String,
    pub name: String,
    /// Free-text notes.
    pub notes: Option<String>,
    pub company_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl ProductType {
    /// Creates a new type under a company.
    pub fn new(name: impl Into<String>, notes: Option<String>, company_id: impl Into<String>) -> Self {
        let now = Utc::now();
        ProductType {
            id: new_id(),
            name: name.into(),
            notes,
            company_id: Some(company_id.into()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A type joined with the name of its company.
///
/// Only types whose company resolves are ever projected this way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductTypeWithCompany {
    pub id: String,
    pub name: String,
    pub notes: Option<String>,
    pub company_id: String,
    pub company_name: String,
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A sellable catalog item (product or service).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// List price in cents. Invoice lines carry their own selling price.
    pub unit_price_cents: i64,
    /// Optional classification.
    pub type_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new catalog item with a fresh id.
    pub fn new(name: impl Into<String>, unit_price: Money, type_id: Option<String>) -> Self {
        let now = Utc::now();
        Item {
            id: new_id(),
            name: name.into(),
            unit_price_cents: unit_price.cents(),
            type_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the list price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A sales invoice header.
///
/// Totals are deliberately absent: they are derived from the line items
/// through [`Invoice::totals`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Invoice {
    pub id: String,
    /// Human-facing bill number.
    pub bill_number: i64,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub client_id: String,
    /// Discount in basis points (1000 = 10%).
    pub discount_bps: u32,
    /// Amount already paid, in cents.
    pub paid_up_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Returns the discount rate.
    #[inline]
    pub fn discount(&self) -> DiscountRate {
        DiscountRate::from_bps(self.discount_bps)
    }

    /// Returns the paid amount as Money.
    #[inline]
    pub fn paid_up(&self) -> Money {
        Money::from_cents(self.paid_up_cents)
    }

    /// Computes the derived aggregates over the given line items.
    ///
    /// Fails when an aggregate does not fit in `i64` cents.
    pub fn totals(&self, items: &[InvoiceItem]) -> ValidationResult<InvoiceTotals> {
        compute_totals(
            items.iter().map(InvoiceItem::total_value),
            self.discount(),
            self.paid_up(),
        )
    }
}

// =============================================================================
// Invoice Item
// =============================================================================

/// A line on an invoice.
///
/// Uses the snapshot pattern for the catalog name: the name is frozen at the
/// time the line is written so renaming a catalog item leaves old invoices
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InvoiceItem {
    pub id: String,
    pub invoice_id: String,
    pub item_id: String,
    /// Catalog item name at time of invoicing (frozen).
    pub name: String,
    /// Unit selling price in cents.
    pub selling_price_cents: i64,
    /// Quantity, always > 0.
    pub quantity: i64,
    /// selling_price × quantity, in cents.
    pub total_value_cents: i64,
}

impl InvoiceItem {
    /// Builds a line for `invoice_id` from a resolved catalog item.
    ///
    /// The total value is computed here and nowhere else.
    pub fn new(invoice_id: &str, item: &Item, selling_price: Money, quantity: i64) -> Self {
        InvoiceItem {
            id: new_id(),
            invoice_id: invoice_id.to_string(),
            item_id: item.id.clone(),
            name: item.name.clone(),
            selling_price_cents: selling_price.cents(),
            quantity,
            total_value_cents: selling_price.multiply_quantity(quantity).cents(),
        }
    }

    /// Returns the unit selling price as Money.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_cents(self.selling_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total_value(&self) -> Money {
        Money::from_cents(self.total_value_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
