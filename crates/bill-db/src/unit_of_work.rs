//! # Unit of Work
//!
//! One database transaction shared by every repository touched during a
//! single business operation.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Unit of Work Lifecycle                            │
//! │                                                                         │
//! │  db.unit_of_work()          ── BEGIN                                   │
//! │       │                                                                 │
//! │       ├── uow.invoices().add(..)        ┐                              │
//! │       ├── uow.invoice_items().add(..)   │ same connection, same txn    │
//! │       └── uow.invoice_items().add(..)   ┘                              │
//! │       │                                                                 │
//! │       ├── uow.complete()    ── COMMIT   (all writes visible)           │
//! │       └── drop(uow)         ── ROLLBACK (nothing persisted)            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any early `?` return in a workflow drops the unit of work, so a failed
//! validation half way through a multi-row write leaves no trace.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::client::ClientRepository;
use crate::repository::company::CompanyRepository;
use crate::repository::invoice::InvoiceRepository;
use crate::repository::invoice_item::InvoiceItemRepository;
use crate::repository::item::ItemRepository;
use crate::repository::product_type::ProductTypeRepository;

/// A transaction scope handing out repositories.
///
/// Repositories borrow the unit of work mutably, so only one of them is
/// alive at a time; they are cheap to re-create per call.
#[derive(Debug)]
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    /// Acquires a connection from the pool and begins a transaction.
    pub(crate) async fn begin(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Unit of work started");
        Ok(UnitOfWork { tx })
    }

    /// Invoice headers.
    pub fn invoices(&mut self) -> InvoiceRepository<'_> {
        InvoiceRepository::new(&mut self.tx)
    }

    /// Invoice lines.
    pub fn invoice_items(&mut self) -> InvoiceItemRepository<'_> {
        InvoiceItemRepository::new(&mut self.tx)
    }

    pub fn clients(&mut self) -> ClientRepository<'_> {
        ClientRepository::new(&mut self.tx)
    }

    /// Catalog items.
    pub fn items(&mut self) -> ItemRepository<'_> {
        ItemRepository::new(&mut self.tx)
    }

    pub fn companies(&mut self) -> CompanyRepository<'_> {
        CompanyRepository::new(&mut self.tx)
    }

    /// Product classification types.
    pub fn types(&mut self) -> ProductTypeRepository<'_> {
        ProductTypeRepository::new(&mut self.tx)
    }

    /// Commits every change made through this unit of work.
    pub async fn complete(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Unit of work committed");
        Ok(())
    }

    /// Discards every change made through this unit of work.
    ///
    /// Dropping the value has the same effect; this just makes it explicit.
    pub async fn rollback(self) -> DbResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Unit of work rolled back");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, Repository};
    use bill_core::Client;

    #[tokio::test]
    async fn test_complete_commits() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let client = Client::new("Alice");

        let mut uow = db.unit_of_work().await.unwrap();
        uow.clients().add(&client).await.unwrap();
        uow.complete().await.unwrap();

        let mut uow = db.unit_of_work().await.unwrap();
        let found = uow.clients().get_by_id(&client.id).await.unwrap();
        assert_eq!(found.map(|c| c.name), Some("Alice".to_string()));
    }

    #[tokio::test]
    async fn test_drop_rolls_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let client = Client::new("Bob");

        {
            let mut uow = db.unit_of_work().await.unwrap();
            uow.clients().add(&client).await.unwrap();
            // dropped without complete()
        }

        let mut uow = db.unit_of_work().await.unwrap();
        assert!(uow.clients().get_by_id(&client.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_explicit_rollback() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let client = Client::new("Carol");

        let mut uow = db.unit_of_work().await.unwrap();
        uow.clients().add(&client).await.unwrap();
        uow.rollback().await.unwrap();

        let mut uow = db.unit_of_work().await.unwrap();
        assert!(uow.clients().list().await.unwrap().is_empty());
    }
}
