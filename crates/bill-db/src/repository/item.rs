//! # Catalog Item Repository
//!
//! Items are what invoice lines reference. An item may carry an optional
//! product type; deleting the type clears it.

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::Repository;
use bill_core::Item;

/// Repository for catalog item database operations.
#[derive(Debug)]
pub struct ItemRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ItemRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        ItemRepository { conn }
    }

    /// Counts all catalog items.
    pub async fn count(&mut self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(count)
    }

    /// Returns true while any invoice line references the item.
    pub async fn is_invoiced(&mut self, id: &str) -> DbResult<bool> {
        let used: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM invoice_items WHERE item_id = ?1)")
                .bind(id)
                .fetch_one(&mut *self.conn)
                .await?;

        Ok(used != 0)
    }
}

impl Repository<Item> for ItemRepository<'_> {
    async fn get_by_id(&mut self, id: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, unit_price_cents, type_id, created_at, updated_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(item)
    }

    async fn list(&mut self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, unit_price_cents, type_id, created_at, updated_at
            FROM items
            ORDER BY name
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(items)
    }

    async fn add(&mut self, item: &Item) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting item");

        sqlx::query(
            r#"
            INSERT INTO items (id, name, unit_price_cents, type_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.unit_price_cents)
        .bind(&item.type_id)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&mut *self.conn)
        .await?;

        Ok(())
    }

    async fn update(&mut self, item: &Item) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                unit_price_cents = ?3,
                type_id = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.unit_price_cents)
        .bind(&item.type_id)
        .bind(Utc::now())
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", &item.id));
        }

        Ok(())
    }

    async fn delete(&mut self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use bill_core::{Company, Money, ProductType};

    #[tokio::test]
    async fn test_item_round_trip_with_type() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();

        let acme = Company::new("Acme");
        uow.companies().add(&acme).await.unwrap();
        let hardware = ProductType::new("Hardware", None, acme.id.clone());
        uow.types().add(&hardware).await.unwrap();

        let bolt = Item::new("Bolt", Money::from_cents(25), Some(hardware.id.clone()));
        uow.items().add(&bolt).await.unwrap();

        let stored = uow.items().get_by_id(&bolt.id).await.unwrap().unwrap();
        assert_eq!(stored.unit_price().cents(), 25);
        assert_eq!(stored.type_id.as_deref(), Some(hardware.id.as_str()));
        assert!(!uow.items().is_invoiced(&bolt.id).await.unwrap());

        // deleting the type detaches the item
        uow.types().delete(&hardware.id).await.unwrap();
        let stored = uow.items().get_by_id(&bolt.id).await.unwrap().unwrap();
        assert!(stored.type_id.is_none());
    }

    #[tokio::test]
    async fn test_unknown_type_is_foreign_key_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();

        let orphan = Item::new("Nut", Money::from_cents(5), Some("missing".to_string()));
        let err = uow.items().add(&orphan).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_negative_price_is_check_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.unit_of_work().await.unwrap();

        let item = Item::new("Refund", Money::from_cents(-1), None);
        match uow.items().add(&item).await.unwrap_err() {
            DbError::CheckViolation { column } => assert_eq!(column, "unit_price_cents"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
