//! # bill-core: Pure Business Logic for the Bill System
//!
//! This crate holds the invoicing rules as pure functions with zero I/O
//! dependencies. Everything that touches the database lives in `bill-db`,
//! everything that touches HTTP lives in the API app.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bill System Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    /invoices  /types  /companies  /clients  /items             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bill-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  totals   │  │ validation│  │   │
//! │  │   │  Invoice  │  │   Money   │  │ BillTotal │  │   rules   │  │   │
//! │  │   │ Company   │  │ Discount  │  │ NetTotal  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bill-db (Database Layer)                     │   │
//! │  │          SQLite queries, migrations, repositories, UoW          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Invoice, InvoiceItem, Client, Item, Company, ProductType)
//! - [`money`] - Money type with integer arithmetic and `DiscountRate`
//! - [`totals`] - The derived invoice aggregates (bill total, net total, the rest)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use bill_core::money::{DiscountRate, Money};
//! use bill_core::totals::compute_totals;
//!
//! let lines = [Money::from_cents(1000) * 2, Money::from_cents(500) * 3];
//! let totals = compute_totals(lines, DiscountRate::from_percentage(10.0), Money::from_cents(4000))?;
//!
//! assert_eq!(totals.bill_total.cents(), 3500);
//! assert_eq!(totals.net_total.cents(), 3150);
//! assert_eq!(totals.the_rest.cents(), 850);
//! # Ok::<(), bill_core::ValidationError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{DiscountRate, Money};
pub use totals::{compute_totals, InvoiceTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of any display name (company, client, item, type).
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of free-text notes on a type record.
pub const MAX_NOTES_LEN: usize = 2000;
