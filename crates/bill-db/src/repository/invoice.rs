//! # Invoice Repository
//!
//! Database operations for invoice headers. Lines live in
//! [`super::invoice_item`]; the workflow layer writes both through the same
//! unit of work.
//!
//! ## Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoice Lifecycle                                 │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── invoices().add(header)                                         │
//! │     └── invoice_items().add(line) × N                                  │
//! │                                                                         │
//! │  2. UPDATE (full replacement of the line set)                          │
//! │     └── invoices().update(header)                                      │
//! │     └── invoice_items().delete_for_invoice(id)                         │
//! │     └── invoice_items().add(line) × N                                  │
//! │                                                                         │
//! │  3. DELETE                                                             │
//! │     └── invoice_items().delete_for_invoice(id)                         │
//! │     └── invoices().delete(id)                                          │
//! │                                                                         │
//! │  Totals are never stored; they are recomputed from the lines.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::Repository;
use bill_core::Invoice;

/// Repository for invoice header operations.
#[derive(Debug)]
pub struct InvoiceRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> InvoiceRepository<'c> {
    /// Creates a new InvoiceRepository.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        InvoiceRepository { conn }
    }

    /// Counts all invoices.
    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }
}

impl Repository<Invoice> for InvoiceRepository<'_> {
    async fn get_by_id(&mut self, id: &str) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT
                id,
                bill_number,
                date,
                client_id,
                discount_bps,
                paid_up_cents,
                created_at,
                updated_at
            FROM invoices
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(invoice)
    }

    /// Lists invoices, newest date first.
    async fn list(&mut self) -> DbResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT
                id,
                bill_number,
                date,
                client_id,
                discount_bps,
                paid_up_cents,
                created_at,
                updated_at
            FROM invoices
            ORDER BY date DESC, bill_number DESC
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(invoices)
    }

    async fn add(&mut self, invoice: &Invoice) -> DbResult<()> {
        debug!(id = %invoice.id, bill_number = invoice.bill_number, "Inserting invoice");

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, bill_number, date, client_id,
                discount_bps, paid_up_cents,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6,
                ?7, ?8
            )
            "#,
        )
        .bind(&invoice.id)
        .bind(invoice.bill_number)
        .bind(invoice.date)
        .bind(&invoice.client_id)
        .bind(invoice.discount_bps)
        .bind(invoice.paid_up_cents)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    async fn update(&mut self, invoice: &Invoice) -> DbResult<()> {
        debug!(id = %invoice.id, "Updating invoice header");

        let result = sqlx::query(
            r#"
            UPDATE invoices SET
                bill_number = ?2,
                date = ?3,
                client_id = ?4,
                discount_bps = ?5,
                paid_up_cents = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&invoice.id)
        .bind(invoice.bill_number)
        .bind(invoice.date)
        .bind(&invoice.client_id)
        .bind(invoice.discount_bps)
        .bind(invoice.paid_up_cents)
        .bind(Utc::now())
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Invoice", &invoice.id));
        }

        Ok(())
    }

    /// Deletes the header only. Remove the lines first.
    async fn delete(&mut self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting invoice");

        let result = sqlx::query("DELETE FROM invoices WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Invoice", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
