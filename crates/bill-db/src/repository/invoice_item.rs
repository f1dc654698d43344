//! # Invoice Item Repository
//!
//! Invoice lines. Each line snapshots the catalog item name and carries its
//! own selling price and precomputed total value.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::Repository;
use bill_core::InvoiceItem;

/// Repository for invoice line operations.
#[derive(Debug)]
pub struct InvoiceItemRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> InvoiceItemRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        InvoiceItemRepository { conn }
    }

    /// Lines of one invoice, in insertion order.
    pub async fn list_for_invoice(&mut self, invoice_id: &str) -> DbResult<Vec<InvoiceItem>> {
        let items = sqlx::query_as::<_, InvoiceItem>(
            r#"
            SELECT
                id,
                invoice_id,
                item_id,
                name,
                selling_price_cents,
                quantity,
                total_value_cents
            FROM invoice_items
            WHERE invoice_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(items)
    }

    /// Removes every line of an invoice and returns how many went.
    pub async fn delete_for_invoice(&mut self, invoice_id: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM invoice_items WHERE invoice_id = ?1")
            .bind(invoice_id)
            .execute(&mut *self.conn)
            .await?;

        debug!(invoice_id = %invoice_id, removed = result.rows_affected(), "Cleared invoice lines");
        Ok(result.rows_affected())
    }
}

impl Repository<InvoiceItem> for InvoiceItemRepository<'_> {
    async fn get_by_id(&mut self, id: &str) -> DbResult<Option<InvoiceItem>> {
        let item = sqlx::query_as::<_, InvoiceItem>(
            r#"
            SELECT
                id,
                invoice_id,
                item_id,
                name,
                selling_price_cents,
                quantity,
                total_value_cents
            FROM invoice_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(item)
    }

    /// Every line of every invoice, grouped by invoice in insertion order.
    async fn list(&mut self) -> DbResult<Vec<InvoiceItem>> {
        let items = sqlx::query_as::<_, InvoiceItem>(
            r#"
            SELECT
                id,
                invoice_id,
                item_id,
                name,
                selling_price_cents,
                quantity,
                total_value_cents
            FROM invoice_items
            ORDER BY invoice_id, rowid
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(items)
    }

    async fn add(&mut self, line: &InvoiceItem) -> DbResult<()> {
        debug!(invoice_id = %line.invoice_id, item_id = %line.item_id, "Adding invoice line");

        sqlx::query(
            r#"
            INSERT INTO invoice_items (
                id, invoice_id, item_id, name,
                selling_price_cents, quantity, total_value_cents
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7
            )
            "#,
        )
        .bind(&line.id)
        .bind(&line.invoice_id)
        .bind(&line.item_id)
        .bind(&line.name)
        .bind(line.selling_price_cents)
        .bind(line.quantity)
        .bind(line.total_value_cents)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    async fn update(&mut self, line: &InvoiceItem) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE invoice_items SET
                item_id = ?2,
                name = ?3,
                selling_price_cents = ?4,
                quantity = ?5,
                total_value_cents = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&line.id)
        .bind(&line.item_id)
        .bind(&line.name)
        .bind(line.selling_price_cents)
        .bind(line.quantity)
        .bind(line.total_value_cents)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("InvoiceItem", &line.id));
        }

        Ok(())
    }

    async fn delete(&mut self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM invoice_items WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("InvoiceItem", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
