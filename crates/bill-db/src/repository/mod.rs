//! # Repository Module
//!
//! Database repository implementations for the Bill System.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Workflow service                                                      │
//! │       │                                                                 │
//! │       │  uow.invoices().get_by_id(id)                                  │
//! │       ▼                                                                 │
//! │  InvoiceRepository<'c>  (borrows the unit of work's connection)        │
//! │  ├── get_by_id / list          ┐                                       │
//! │  ├── add / update / delete     ┘ Repository<Invoice>                   │
//! │  └── entity specific queries                                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (inside the open transaction)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`company::CompanyRepository`] - Companies
//! - [`client::ClientRepository`] - Clients
//! - [`item::ItemRepository`] - Catalog items
//! - [`product_type::ProductTypeRepository`] - Types, joined with companies
//! - [`invoice::InvoiceRepository`] - Invoice headers
//! - [`invoice_item::InvoiceItemRepository`] - Invoice lines

pub mod client;
pub mod company;
pub mod invoice;
pub mod invoice_item;
pub mod item;
pub mod product_type;

use crate::error::DbResult;

/// Generic data access for one entity kind.
///
/// `update` and `delete` report [`crate::DbError::NotFound`] when no row
/// matched the id.
#[allow(async_fn_in_trait)]
pub trait Repository<T> {
    /// Fetches one entity, `None` when the id is unknown.
    async fn get_by_id(&mut self, id: &str) -> DbResult<Option<T>>;

    /// Fetches every entity.
    async fn list(&mut self) -> DbResult<Vec<T>>;

    /// Inserts a new entity.
    async fn add(&mut self, entity: &T) -> DbResult<()>;

    /// Overwrites the stored entity with the same id.
    async fn update(&mut self, entity: &T) -> DbResult<()>;

    /// Removes the entity with the given id.
    async fn delete(&mut self, id: &str) -> DbResult<()>;
}
