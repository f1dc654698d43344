//! # bill-db: Database Layer for the Bill System
//!
//! This crate provides database access for the invoicing back-office.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bill System Data Flow                            │
//! │                                                                         │
//! │  HTTP handler (POST /invoices)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bill-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  UnitOfWork   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │───►│  (one txn)    │    │  (embedded)  │  │   │
//! │  │   │               │    │      │        │    │              │  │   │
//! │  │   │ SqlitePool    │    │      ▼        │    │ 001_init.sql │  │   │
//! │  │   │               │    │ Repositories  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (BILL_DB_PATH)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`unit_of_work`] - Transaction scope with an explicit commit
//! - [`repository`] - The `Repository` trait and per-entity implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bill_db::{Database, DbConfig, Repository};
//!
//! let db = Database::new(DbConfig::new("bill.db")).await?;
//!
//! let mut uow = db.unit_of_work().await?;
//! uow.companies().add(&Company::new("Acme")).await?;
//! uow.complete().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod unit_of_work;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::Repository;
pub use unit_of_work::UnitOfWork;

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::company::CompanyRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::invoice_item::InvoiceItemRepository;
pub use repository::item::ItemRepository;
pub use repository::product_type::{CompanyMatch, ProductTypeRepository};
